//! 规则抑制机制
//!
//! 支持以下方式抑制异味报告 (Python 注释):
//!
//! 1. 当前行抑制
//!    # smell-ignore: LongMethod
//!    # smell-ignore: LongMethod, MagicNumbers
//!    # smell-ignore            (抑制该行所有异味)
//!
//! 2. 下一行抑制
//!    # smell-ignore-next-line: MagicNumbers
//!
//! 3. 文件级抑制
//!    # smell-ignore-file: DuplicatedCode
//!    # smell-ignore-file      (抑制所有异味)
//!
//! 异味报告以其起始行为准: 函数/类的 `def`/`class` 行，数字所在行，重复块的首行。

use std::collections::{HashMap, HashSet};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::SmellKind;

/// 抑制指令正则
static SUPPRESS_COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    // 匹配: smell-ignore / smell-ignore-next-line / smell-ignore-file，可选 ": ID, ID"
    Regex::new(r"#\s*smell-ignore(-next-line|-file)?(?:\s*:\s*([A-Za-z_\-,\s]*))?").unwrap()
});

/// 抑制类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionType {
    /// 当前行抑制
    Line,
    /// 下一行抑制
    NextLine,
    /// 整个文件抑制
    File,
}

/// 抑制记录
#[derive(Debug, Clone)]
pub struct Suppression {
    pub suppression_type: SuppressionType,
    /// 被抑制的异味
    pub smells: HashSet<SmellKind>,
    /// 所在行号
    pub line: usize,
}

/// 文件抑制上下文
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// 行号 -> 该行被抑制的异味
    line_suppressions: HashMap<usize, HashSet<SmellKind>>,
    /// 文件级抑制的异味
    file_suppressions: HashSet<SmellKind>,
}

impl SuppressionContext {
    /// 从注释中解析抑制指令
    ///
    /// 输入为 `(1-based 行号, 注释文本)`，只接受语法树中的注释节点，
    /// 字符串字面量里的 `# smell-ignore` 不会生效。
    pub fn from_comments<'a, I>(comments: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut ctx = Self::default();

        for (line_number, text) in comments {
            let Some(suppression) = parse_comment_suppression(text, line_number) else {
                continue;
            };

            match suppression.suppression_type {
                SuppressionType::Line => {
                    ctx.line_suppressions
                        .entry(suppression.line)
                        .or_default()
                        .extend(suppression.smells);
                }
                SuppressionType::NextLine => {
                    ctx.line_suppressions
                        .entry(suppression.line + 1)
                        .or_default()
                        .extend(suppression.smells);
                }
                SuppressionType::File => {
                    ctx.file_suppressions.extend(suppression.smells);
                }
            }
        }

        ctx
    }

    /// 检查指定异味在指定行是否被抑制
    pub fn is_suppressed(&self, smell: SmellKind, line: usize) -> bool {
        if self.file_suppressions.contains(&smell) {
            return true;
        }

        self.line_suppressions
            .get(&line)
            .is_some_and(|smells| smells.contains(&smell))
    }

    /// 检查文件是否完全被抑制
    pub fn is_file_suppressed(&self) -> bool {
        SmellKind::ALL.iter().all(|s| self.file_suppressions.contains(s))
    }
}

/// 解析单条注释中的抑制指令
fn parse_comment_suppression(comment: &str, line_number: usize) -> Option<Suppression> {
    if !comment.contains("smell-ignore") {
        return None;
    }

    let captures = SUPPRESS_COMMENT_REGEX.captures(comment)?;

    let suppression_type = match captures.get(1).map(|m| m.as_str()) {
        Some("-file") => SuppressionType::File,
        Some("-next-line") => SuppressionType::NextLine,
        _ => SuppressionType::Line,
    };

    let ids: Vec<&str> = captures
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let smells: HashSet<SmellKind> = if ids.is_empty() {
        SmellKind::ALL.into_iter().collect()
    } else {
        ids.iter().filter_map(|id| id.parse().ok()).collect()
    };

    // 指定了 ID 但全部无法识别: 忽略整条指令，避免误抑制所有异味
    if smells.is_empty() {
        debug!("Ignoring suppression with unknown smells on line {line_number}: {ids:?}");
        return None;
    }

    Some(Suppression {
        suppression_type,
        smells,
        line: line_number,
    })
}
