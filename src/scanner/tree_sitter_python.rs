use super::{CodeAnalyzer, Finding, LineRange, ParseError};
use super::model::{
    parse_number, AttributeAccess, ClassUnit, Comment, FunctionUnit, NumberLiteral, Param,
    ParamKind, SourceModel,
};
use super::rule_handlers::{create_handler, RuleContext, RuleHandler};
use crate::config::DetectorConfig;
use crate::rules::suppression::SuppressionContext;
use std::cell::RefCell;
use std::path::Path;
use anyhow::{Result, anyhow};
use tracing::debug;
use tree_sitter::{Node, Parser, Point, Query, QueryCursor, Tree};

// ============================================================================
// thread_local Parser 复用
// ============================================================================
//
// Parser::new() 和 set_language() 涉及 native 层初始化和内存分配。
// 使用 thread_local 确保每个线程只初始化一次 Parser，
// 这在 rayon 并行迭代器中尤其重要。
//
// ============================================================================

thread_local! {
    /// 线程本地 Parser 实例 (避免重复创建)
    static PYTHON_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// 获取或初始化线程本地 Parser
fn with_parser<F, R>(language: &tree_sitter::Language, f: F) -> Result<R>
where
    F: FnOnce(&mut Parser) -> Result<R>,
{
    PYTHON_PARSER.with(|cell| {
        let mut parser_opt = cell.borrow_mut();

        // 懒初始化 Parser
        if parser_opt.is_none() {
            let mut parser = Parser::new();
            parser.set_language(language)
                .map_err(|e| anyhow!("Failed to set language: {e}"))?;
            *parser_opt = Some(parser);
        }

        let parser = parser_opt.as_mut().ok_or_else(|| anyhow!("Parser unavailable"))?;
        f(parser)
    })
}

/// 检测处理器 (只为启用的异味创建)
struct CompiledRule {
    handler: Box<dyn RuleHandler>,
}

pub struct PythonTreeSitterAnalyzer {
    language: tree_sitter::Language,
    compiled_rules: Vec<CompiledRule>,
    /// 函数定义查询
    function_query: Query,
    /// 类定义查询
    class_query: Query,
    /// 数字字面量查询
    number_query: Query,
    /// `name.attr` 属性访问查询
    attribute_query: Query,
    /// 注释查询 (抑制指令只从注释中解析)
    comment_query: Query,
}

impl PythonTreeSitterAnalyzer {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let language = tree_sitter_python::language();

        // 预编译所有查询
        let function_query = Self::compile_query(&language, "function", r#"
            (function_definition
                name: (identifier) @function_name
            ) @function
        "#)?;
        let class_query = Self::compile_query(&language, "class", r#"
            (class_definition
                name: (identifier) @class_name
                body: (block) @class_body
            ) @class
        "#)?;
        let number_query = Self::compile_query(&language, "number", r#"
            [(integer) (float)] @number
        "#)?;
        let attribute_query = Self::compile_query(&language, "attribute", r#"
            (attribute
                object: (identifier) @receiver
                attribute: (identifier) @attribute
            ) @access
        "#)?;
        let comment_query = Self::compile_query(&language, "comment", "(comment) @comment")?;

        let compiled_rules = config
            .enabled_smells()
            .into_iter()
            .map(|smell| CompiledRule { handler: create_handler(smell, config) })
            .collect();

        Ok(Self {
            language,
            compiled_rules,
            function_query,
            class_query,
            number_query,
            attribute_query,
            comment_query,
        })
    }

    fn compile_query(language: &tree_sitter::Language, name: &str, source: &str) -> Result<Query> {
        Query::new(language, source)
            .map_err(|e| anyhow!("Failed to compile {name} query: {e}"))
    }

    /// 解析源码并构建结构模型 (使用 thread_local Parser)
    pub fn parse_model(&self, code: &str) -> Result<SourceModel> {
        with_parser(&self.language, |parser| {
            let tree = parser.parse(code, None).ok_or_else(|| anyhow!("Failed to parse code"))?;
            self.model_from_tree(&tree, code)
        })
    }

    /// 从已解析的 Tree 中构建模型
    fn model_from_tree(&self, tree: &Tree, code: &str) -> Result<SourceModel> {
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error_position(root).unwrap_or((1, 1));
            return Err(ParseError::Syntax { line, column }.into());
        }

        // Python 2 语句能被语法树接受，但不是合法的 Python 3
        if let Some(pos) = first_legacy_statement(root) {
            return Err(ParseError::Syntax { line: pos.row + 1, column: pos.column + 1 }.into());
        }

        let source = code.as_bytes();
        Ok(SourceModel {
            functions: self.extract_functions(root, source),
            classes: self.extract_classes(root, source),
            numbers: self.extract_numbers(root, source),
            attributes: self.extract_attributes(root, source),
            comments: self.extract_comments(root, source),
            lines: code.lines().map(str::to_string).collect(),
        })
    }

    fn extract_functions(&self, root: Node, source: &[u8]) -> Vec<FunctionUnit> {
        let mut functions = Vec::new();
        let Some(function_idx) = self.function_query.capture_index_for_name("function") else {
            return functions;
        };

        let mut cursor = QueryCursor::new();
        for m in cursor.matches(&self.function_query, root, source) {
            for capture in m.captures {
                if capture.index == function_idx {
                    functions.push(function_unit(capture.node, source));
                }
            }
        }

        functions.sort_by_key(|f| (f.lines.start, f.bytes.start));
        functions
    }

    fn extract_classes(&self, root: Node, source: &[u8]) -> Vec<ClassUnit> {
        let mut classes = Vec::new();
        let Some(class_idx) = self.class_query.capture_index_for_name("class") else {
            return classes;
        };

        let mut cursor = QueryCursor::new();
        for m in cursor.matches(&self.class_query, root, source) {
            for capture in m.captures {
                if capture.index == class_idx {
                    classes.push(class_unit(capture.node, source));
                }
            }
        }

        classes.sort_by_key(|c| c.lines.start);
        classes
    }

    fn extract_numbers(&self, root: Node, source: &[u8]) -> Vec<NumberLiteral> {
        let mut numbers = Vec::new();
        let mut cursor = QueryCursor::new();

        for m in cursor.matches(&self.number_query, root, source) {
            for capture in m.captures {
                let literal = capture.node;
                let text = node_text(literal, source);

                // 负号合并: (unary_operator operator: "-" argument: (integer))
                let negated = literal
                    .parent()
                    .filter(|p| p.kind() == "unary_operator")
                    .filter(|p| p.child_by_field_name("operator").is_some_and(|op| op.kind() == "-"));

                let (node, text) = match negated {
                    Some(parent) => (parent, format!("-{text}")),
                    None => (literal, text.to_string()),
                };

                numbers.push(NumberLiteral {
                    value: parse_number(&text),
                    text,
                    line: node.start_position().row + 1,
                    byte: node.start_byte(),
                });
            }
        }

        numbers.sort_by_key(|n| n.byte);
        numbers
    }

    fn extract_attributes(&self, root: Node, source: &[u8]) -> Vec<AttributeAccess> {
        let mut accesses = Vec::new();
        let receiver_idx = self.attribute_query.capture_index_for_name("receiver");
        let attribute_idx = self.attribute_query.capture_index_for_name("attribute");
        let access_idx = self.attribute_query.capture_index_for_name("access");

        let mut cursor = QueryCursor::new();
        for m in cursor.matches(&self.attribute_query, root, source) {
            let mut receiver = String::new();
            let mut attribute = String::new();
            let mut position = None;

            for capture in m.captures {
                if Some(capture.index) == receiver_idx {
                    receiver = node_text(capture.node, source).to_string();
                }
                if Some(capture.index) == attribute_idx {
                    attribute = node_text(capture.node, source).to_string();
                }
                if Some(capture.index) == access_idx {
                    position = Some((capture.node.start_position().row + 1, capture.node.start_byte()));
                }
            }

            if let Some((line, byte)) = position {
                if !receiver.is_empty() {
                    accesses.push(AttributeAccess { receiver, attribute, line, byte });
                }
            }
        }

        accesses.sort_by_key(|a| a.byte);
        accesses
    }

    fn extract_comments(&self, root: Node, source: &[u8]) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut cursor = QueryCursor::new();

        for m in cursor.matches(&self.comment_query, root, source) {
            for capture in m.captures {
                comments.push(Comment {
                    line: capture.node.start_position().row + 1,
                    text: node_text(capture.node, source).to_string(),
                });
            }
        }

        comments.sort_by_key(|c| c.line);
        comments
    }
}

impl CodeAnalyzer for PythonTreeSitterAnalyzer {
    fn supported_extension(&self) -> &str {
        "py"
    }

    fn analyze(&self, code: &str, file_path: &Path) -> Result<Vec<Finding>> {
        let model = self.parse_model(code)?;

        let file = file_path.to_string_lossy().to_string();
        let ctx = RuleContext { file: &file };

        let mut findings = Vec::new();
        for rule in &self.compiled_rules {
            let detected = rule.handler.detect(&model, &ctx);
            debug!("{}: {} {} finding(s)", file, rule.handler.smell(), detected.len());
            findings.extend(detected);
        }

        // 应用规则抑制机制
        let suppression_ctx = SuppressionContext::from_comments(
            model.comments.iter().map(|c| (c.line, c.text.as_str())),
        );
        if suppression_ctx.is_file_suppressed() {
            return Ok(Vec::new());
        }

        Ok(findings
            .into_iter()
            .filter(|f| !suppression_ctx.is_suppressed(f.smell, f.lines.start))
            .collect())
    }
}

// ============================================================================
// 节点辅助函数
// ============================================================================

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 节点所占行范围
///
/// 以换行结尾的节点 end_position 落在下一行第 0 列，此时不计入该行。
fn line_range(node: Node) -> LineRange {
    let start = node.start_position();
    let end = node.end_position();
    let end_line = if end.column == 0 && end.row > start.row { end.row } else { end.row + 1 };
    LineRange::new(start.row + 1, end_line)
}

/// 定义所占行范围: 起始行到最后一个非注释 token 所在行
///
/// 块末尾缩进的注释会被 tree-sitter 归入函数体，不计入长度。
fn code_range(node: Node) -> LineRange {
    let start = node.start_position();
    match last_code_point(node) {
        Some(end) => {
            let end_line = if end.column == 0 && end.row > start.row { end.row } else { end.row + 1 };
            LineRange::new(start.row + 1, end_line)
        }
        None => line_range(node),
    }
}

/// 最后一个非注释叶子节点的结束位置
fn last_code_point(node: Node) -> Option<Point> {
    if node.kind() == "comment" || node.start_byte() == node.end_byte() {
        return None;
    }
    if node.child_count() == 0 {
        return Some(node.end_position());
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().rev().find_map(last_code_point)
}

/// 第一个 `print` / `exec` 语句 (Python 2) 的位置
fn first_legacy_statement(root: Node) -> Option<Point> {
    let mut cursor = root.walk();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            return Some(node.start_position());
        }
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    None
}

/// 第一个 ERROR / MISSING 节点的位置 (1-based)
fn first_error_position(root: Node) -> Option<(usize, usize)> {
    let mut cursor = root.walk();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some((pos.row + 1, pos.column + 1));
        }
        if node.has_error() {
            // 逆序压栈，保证先访问靠前的子节点
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    None
}

fn function_unit(node: Node, source: &[u8]) -> FunctionUnit {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or("<anonymous>")
        .to_string();

    let params = node
        .child_by_field_name("parameters")
        .map(|p| collect_params(p, source))
        .unwrap_or_default();

    let is_async = node.child(0).is_some_and(|c| c.kind() == "async");

    FunctionUnit {
        name,
        lines: code_range(node),
        params,
        is_async,
        bytes: node.start_byte()..node.end_byte(),
    }
}

/// 收集参数列表
///
/// `*` / `/` 分隔符不计为参数；`*` 或 `*args` 之后的参数为 keyword-only。
fn collect_params(parameters: Node, source: &[u8]) -> Vec<Param> {
    let mut params = Vec::new();
    let mut keyword_only = false;
    let mut cursor = parameters.walk();

    for child in parameters.named_children(&mut cursor) {
        match child.kind() {
            "keyword_separator" => keyword_only = true,
            "positional_separator" | "comment" => {}
            _ => match param_from_node(child, keyword_only, source) {
                Some(param) => {
                    if param.kind == ParamKind::VarArgs {
                        keyword_only = true;
                    }
                    params.push(param);
                }
                // 无名称的 list_splat_pattern 即裸 `*`
                None if child.kind() == "list_splat_pattern" => keyword_only = true,
                None => {}
            },
        }
    }

    params
}

fn param_from_node(node: Node, keyword_only: bool, source: &[u8]) -> Option<Param> {
    let plain_kind = if keyword_only { ParamKind::Keyword } else { ParamKind::Positional };

    match node.kind() {
        "identifier" => Some(Param::new(node_text(node, source), plain_kind)),
        "default_parameter" | "typed_default_parameter" => node
            .child_by_field_name("name")
            .map(|n| Param::new(node_text(n, source), plain_kind)),
        "typed_parameter" => node
            .named_child(0)
            .and_then(|inner| param_from_node(inner, keyword_only, source)),
        "list_splat_pattern" => first_identifier(node)
            .map(|n| Param::new(node_text(n, source), ParamKind::VarArgs)),
        "dictionary_splat_pattern" => first_identifier(node)
            .map(|n| Param::new(node_text(n, source), ParamKind::KwArgs)),
        "tuple_pattern" => Some(Param::new(node_text(node, source), plain_kind)),
        _ => None,
    }
}

fn first_identifier(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == "identifier");
    found
}

fn class_unit(node: Node, source: &[u8]) -> ClassUnit {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or("<anonymous>")
        .to_string();

    let mut methods = Vec::new();
    let mut attributes = Vec::new();

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for item in body.named_children(&mut cursor) {
            match item.kind() {
                "function_definition" => methods.push(definition_name(item, source)),
                "decorated_definition" => {
                    if let Some(def) = item
                        .child_by_field_name("definition")
                        .filter(|d| d.kind() == "function_definition")
                    {
                        methods.push(definition_name(def, source));
                    }
                }
                "expression_statement" => {
                    let mut stmt_cursor = item.walk();
                    for expr in item.named_children(&mut stmt_cursor) {
                        if expr.kind() == "assignment" {
                            collect_assignment_targets(expr, source, &mut attributes);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    ClassUnit {
        name,
        lines: code_range(node),
        methods,
        attributes,
    }
}

fn definition_name(node: Node, source: &[u8]) -> String {
    node.child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or("<anonymous>")
        .to_string()
}

/// 类级赋值目标: `a = 1` 计 1 个，`a = b = 1` 计 2 个；
/// 带类型注解的赋值与元组解包不计入。
fn collect_assignment_targets(assignment: Node, source: &[u8], targets: &mut Vec<String>) {
    if assignment.child_by_field_name("type").is_some() {
        return;
    }

    if let Some(left) = assignment.child_by_field_name("left") {
        if left.kind() == "identifier" {
            targets.push(node_text(left, source).to_string());
        }
    }

    if let Some(right) = assignment.child_by_field_name("right") {
        if right.kind() == "assignment" {
            collect_assignment_targets(right, source, targets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SmellKind;
    use std::path::PathBuf;

    fn analyzer() -> PythonTreeSitterAnalyzer {
        PythonTreeSitterAnalyzer::new(&DetectorConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_functions() {
        let code = r#"
import functools

@functools.lru_cache
def cached(a, b=2, *args, c, d: int = 4, **kwargs):
    return a

class Service:
    async def fetch(self, url: str, /, timeout=None):
        def inner():
            pass
        return inner
"#;

        let model = analyzer().parse_model(code).unwrap();
        let names: Vec<&str> = model.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["cached", "fetch", "inner"]);

        let cached = &model.functions[0];
        assert_eq!(cached.lines, LineRange::new(5, 6));
        let kinds: Vec<ParamKind> = cached.params.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParamKind::Positional,
                ParamKind::Positional,
                ParamKind::VarArgs,
                ParamKind::Keyword,
                ParamKind::Keyword,
                ParamKind::KwArgs,
            ]
        );
        assert_eq!(cached.params[2].name, "args");
        assert_eq!(cached.params[5].name, "kwargs");
        assert!(!cached.is_async);

        let fetch = &model.functions[1];
        assert!(fetch.is_async);
        assert_eq!(fetch.receiver(), Some("self"));
        assert_eq!(fetch.parameter_count(), 2);
        assert_eq!(fetch.lines, LineRange::new(9, 12));
    }

    #[test]
    fn test_bare_star_is_not_a_parameter() {
        let model = analyzer().parse_model("def f(a, *, b, c):\n    pass\n").unwrap();
        let f = &model.functions[0];
        assert_eq!(f.params.len(), 3);
        assert_eq!(f.params[1], Param::new("b", ParamKind::Keyword));
    }

    #[test]
    fn test_extract_class_members() {
        let code = r#"
class Config:
    name = "default"
    a = b = 0
    x, y = 1, 2
    typed: int = 3

    def load(self):
        self.loaded = True

    @property
    def size(self):
        return 1

    @staticmethod
    async def refresh():
        pass

    class Inner:
        pass
"#;

        let model = analyzer().parse_model(code).unwrap();
        let config = model.classes.iter().find(|c| c.name == "Config").unwrap();
        assert_eq!(config.methods, vec!["load", "size", "refresh"]);
        assert_eq!(config.attributes, vec!["name", "a", "b"]);
        assert_eq!(config.lines.start, 2);
        assert_eq!(model.classes.len(), 2);
    }

    #[test]
    fn test_extract_numbers() {
        let code = "rate = 0.25\noffset = -3\nmask = 0xFF\n# 999 in a comment\nlabel = \"777\"\nz = 2j\n";

        let model = analyzer().parse_model(code).unwrap();
        let texts: Vec<&str> = model.numbers.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["0.25", "-3", "0xFF", "2j"]);

        assert_eq!(model.numbers[1].value, Some(-3.0));
        assert_eq!(model.numbers[1].line, 2);
        assert_eq!(model.numbers[2].value, Some(255.0));
        assert_eq!(model.numbers[3].value, None);
    }

    #[test]
    fn test_extract_attributes() {
        let code = r#"
class Invoice:
    def total(self, order):
        return order.price * self.rate + order.customer.discount
"#;

        let model = analyzer().parse_model(code).unwrap();
        let receivers: Vec<(&str, &str)> = model
            .attributes
            .iter()
            .map(|a| (a.receiver.as_str(), a.attribute.as_str()))
            .collect();
        assert_eq!(
            receivers,
            vec![("order", "price"), ("self", "rate"), ("order", "customer")]
        );

        let total = &model.functions[0];
        assert_eq!(model.attributes_in(total).count(), 3);
        assert_eq!(model.attributes_in(total).filter(|a| a.is_internal()).count(), 1);
    }

    #[test]
    fn test_syntax_error() {
        let code = "def broken(:\n    pass\n";
        let err = analyzer().parse_model(code).unwrap_err();
        let parse_err = err.downcast_ref::<ParseError>().expect("should be a ParseError");
        assert!(matches!(parse_err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_analyze_runs_enabled_rules() {
        let code = r#"
def compute(a, b, c, d, e, f):
    return a * 42
"#;

        let file = PathBuf::from("compute.py");
        let issues = analyzer().analyze(code, &file).unwrap();
        let smells: Vec<SmellKind> = issues.iter().map(|i| i.smell).collect();
        assert_eq!(smells, vec![SmellKind::LargeParameterList, SmellKind::MagicNumbers]);
        assert!(issues.iter().all(|i| i.file == "compute.py"));
    }

    #[test]
    fn test_analyze_skips_disabled_rules() {
        let code = "def compute(a, b, c, d, e, f):\n    return a * 42\n";

        let config = DetectorConfig::default()
            .with_cli_overrides(&[], &["MagicNumbers".to_string()]);
        let analyzer = PythonTreeSitterAnalyzer::new(&config).unwrap();
        let issues = analyzer.analyze(code, &PathBuf::from("compute.py")).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].smell, SmellKind::LargeParameterList);
    }

    #[test]
    fn test_suppression_comment() {
        let code = r#"
def compute(a, b, c, d, e, f):  # smell-ignore: LargeParameterList
    return a * 42  # smell-ignore
"#;

        let issues = analyzer().analyze(code, &PathBuf::from("compute.py")).unwrap();
        assert!(issues.is_empty(), "all findings should be suppressed: {issues:?}");
    }

    #[test]
    fn test_trailing_body_comment_not_counted() {
        let mut code = String::from("def f():\n");
        for i in 1..20 {
            code.push_str(&format!("    step_{i} = None\n"));
        }
        code.push_str("    # trailing body comment\n");
        code.push_str("\nclass Holder:\n    value = None\n    # closing note\n");

        let model = analyzer().parse_model(&code).unwrap();
        assert_eq!(model.functions[0].lines, LineRange::new(1, 20));
        assert_eq!(model.classes[0].lines, LineRange::new(23, 24));

        let config = DetectorConfig::default().with_cli_overrides(&["LongMethod".to_string()], &[]);
        let issues = PythonTreeSitterAnalyzer::new(&config)
            .unwrap()
            .analyze(&code, &PathBuf::from("f.py"))
            .unwrap();
        assert!(issues.is_empty(), "a 20-line function is not a LongMethod: {issues:?}");
    }

    #[test]
    fn test_extract_comments() {
        let code = "# header\nx = 1  # inline\nlabel = \"# not a comment\"\n";
        let model = analyzer().parse_model(code).unwrap();
        let comments: Vec<(usize, &str)> =
            model.comments.iter().map(|c| (c.line, c.text.as_str())).collect();
        assert_eq!(comments, vec![(1, "# header"), (2, "# inline")]);
    }

    #[test]
    fn test_directive_inside_string_is_ignored() {
        let code = "MSG = '# smell-ignore-file'\nx = 42\n";
        let config = DetectorConfig::default().with_cli_overrides(&["MagicNumbers".to_string()], &[]);
        let issues = PythonTreeSitterAnalyzer::new(&config)
            .unwrap()
            .analyze(code, &PathBuf::from("msg.py"))
            .unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].lines.start, 2);
    }

    #[test]
    fn test_python2_statements_rejected() {
        let err = analyzer().parse_model("x = 1\nprint 'hello'\n").unwrap_err();
        let parse_err = err.downcast_ref::<ParseError>().expect("should be a ParseError");
        assert_eq!(*parse_err, ParseError::Syntax { line: 2, column: 1 });

        assert!(analyzer().parse_model("print('hello')\n").is_ok());
    }

    #[test]
    fn test_suppression_file_level() {
        let code = "# smell-ignore-file\ndef compute(a, b, c, d, e, f):\n    return a * 42\n";
        let issues = analyzer().analyze(code, &PathBuf::from("compute.py")).unwrap();
        assert!(issues.is_empty());
    }
}
