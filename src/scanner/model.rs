// ============================================================================
// 结构模型 - Python 源文件的结构化表示
// ============================================================================
//
// 由 tree_sitter_python 在一次解析中构建，所有检测处理器只读共享。
// 行号均为 1-based；字节偏移用于判断属性访问/字面量归属于哪个函数。
//
// ============================================================================

use std::ops::Range;

use super::LineRange;

/// 参数类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// 普通位置参数 (含 positional-only)
    Positional,
    /// `*args`
    VarArgs,
    /// `*` 或 `*args` 之后的 keyword-only 参数
    Keyword,
    /// `**kwargs`
    KwArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

impl Param {
    pub fn new(name: &str, kind: ParamKind) -> Self {
        Self { name: name.to_string(), kind }
    }
}

/// 函数 / 方法 (含嵌套函数)
#[derive(Debug, Clone)]
pub struct FunctionUnit {
    pub name: String,
    /// `def` 行到函数体最后一行，不含装饰器
    pub lines: LineRange,
    pub params: Vec<Param>,
    pub is_async: bool,
    pub bytes: Range<usize>,
}

impl FunctionUnit {
    /// 第一个位置参数为 `self` / `cls` 时返回它
    pub fn receiver(&self) -> Option<&str> {
        self.params
            .first()
            .filter(|p| p.kind == ParamKind::Positional)
            .map(|p| p.name.as_str())
            .filter(|name| is_receiver(name))
    }

    pub fn is_method(&self) -> bool {
        self.receiver().is_some()
    }

    /// 参数个数，不计 `self` / `cls`
    pub fn parameter_count(&self) -> usize {
        let total = self.params.len();
        if self.is_method() { total - 1 } else { total }
    }

    pub fn contains(&self, byte: usize) -> bool {
        self.bytes.contains(&byte)
    }
}

/// `self` / `cls`
pub fn is_receiver(name: &str) -> bool {
    matches!(name, "self" | "cls")
}

/// 类定义
#[derive(Debug, Clone)]
pub struct ClassUnit {
    pub name: String,
    pub lines: LineRange,
    /// 类体中直接定义的方法
    pub methods: Vec<String>,
    /// 类级别的简单赋值目标
    pub attributes: Vec<String>,
}

/// 数字字面量
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    /// 源码文本 (负号已合并)
    pub text: String,
    /// 数值；虚数字面量为 None
    pub value: Option<f64>,
    pub line: usize,
    pub byte: usize,
}

/// `name.attr` 形式的属性访问
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAccess {
    pub receiver: String,
    pub attribute: String,
    pub line: usize,
    pub byte: usize,
}

impl AttributeAccess {
    pub fn is_internal(&self) -> bool {
        is_receiver(&self.receiver)
    }
}

/// `#` 注释 (含行内注释)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub line: usize,
    pub text: String,
}

/// 单个源文件的结构模型
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    pub functions: Vec<FunctionUnit>,
    pub classes: Vec<ClassUnit>,
    pub numbers: Vec<NumberLiteral>,
    pub attributes: Vec<AttributeAccess>,
    pub comments: Vec<Comment>,
    /// 源码行 (不含换行符)
    pub lines: Vec<String>,
}

impl SourceModel {
    /// 1-based 行内容
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// 函数范围内的属性访问
    pub fn attributes_in<'a>(
        &'a self,
        function: &'a FunctionUnit,
    ) -> impl Iterator<Item = &'a AttributeAccess> + 'a {
        self.attributes.iter().filter(move |a| function.contains(a.byte))
    }
}

/// 解析 Python 数字字面量
///
/// 支持下划线分隔、`0x`/`0o`/`0b` 前缀、Python 2 的 `L` 后缀；虚数返回 None。
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, cleaned.as_str()),
    };

    if unsigned.ends_with('j') {
        return None;
    }
    let unsigned = unsigned.trim_end_matches('l');

    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| unsigned.strip_prefix(prefix).map(|digits| (digits, radix)));

    let value = match radix {
        Some((digits, radix)) => u64::from_str_radix(digits, radix).ok()? as f64,
        None => unsigned.parse::<f64>().ok()?,
    };

    Some(if negative { -value } else { value })
}
