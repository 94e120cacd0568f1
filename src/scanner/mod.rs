//! 扫描器 - 源码结构分析与异味检测
//!
//! - `tree_sitter_python`: 解析 Python 源码，构建结构模型并执行检测
//! - `model`: 结构模型 (函数、类、数字字面量、属性访问)
//! - `rule_handlers`: 六种异味的检测处理器

use std::fmt;
use std::path::Path;
use anyhow::Result;
use serde::Serialize;

use crate::rules::SmellKind;

pub mod model;
pub mod rule_handlers;
pub mod tree_sitter_python;

/// 分析器 trait
pub trait CodeAnalyzer: Send + Sync {
    /// 支持的文件扩展名
    fn supported_extension(&self) -> &str;

    /// 分析源码，返回检测到的异味
    fn analyze(&self, code: &str, file_path: &Path) -> Result<Vec<Finding>>;
}

/// 行范围 (1-based, 闭区间)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(line: usize) -> Self {
        Self { start: line, end: line }
    }

    /// 覆盖的行数
    pub fn line_count(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// 检测证据 (报告中展示的度量值)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// 函数长度
    Length { lines: usize },
    /// 类成员数量
    Members { methods: usize, attributes: usize },
    /// 重复代码块
    Duplicate { other: LineRange, sample: String },
    /// 参数数量
    Parameters { count: usize },
    /// 数字字面量
    Literal { text: String, context: String },
    /// 属性访问统计
    Access { external: usize, internal: usize },
}

/// 一次异味检测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub smell: SmellKind,
    pub file: String,
    pub lines: LineRange,
    /// 函数名 / 类名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub justification: String,
    pub evidence: Evidence,
}

impl Finding {
    /// 报告中的单行摘要
    pub fn summary(&self) -> String {
        let name = self.subject.as_deref().unwrap_or("<module>");
        match &self.evidence {
            Evidence::Length { lines } => {
                format!("{name} (lines {}) - {lines} lines", self.lines)
            }
            Evidence::Members { methods, attributes } => format!(
                "{name} (lines {}) - {methods} methods, {attributes} attributes",
                self.lines
            ),
            Evidence::Duplicate { other, .. } => {
                format!("Duplication: lines {} ↔ {other}", self.lines)
            }
            Evidence::Parameters { count } => {
                format!("{name} (line {}) - {count} parameters", self.lines.start)
            }
            Evidence::Literal { text, context } => {
                format!("Line {}: number {text} - '{context}'", self.lines.start)
            }
            Evidence::Access { external, internal } => format!(
                "{name} (line {}) - external: {external}, internal: {internal}",
                self.lines.start
            ),
        }
    }
}

/// 源码解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 语法错误 (1-based 行列)
    Syntax { line: usize, column: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { line, column } => {
                write!(f, "syntax error at line {line}, column {column}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(lines: LineRange, evidence: Evidence) -> Finding {
        Finding {
            smell: SmellKind::LongMethod,
            file: "app.py".to_string(),
            lines,
            subject: Some("process".to_string()),
            justification: String::new(),
            evidence,
        }
    }

    #[test]
    fn test_line_range() {
        let range = LineRange::new(3, 25);
        assert_eq!(range.line_count(), 23);
        assert_eq!(range.to_string(), "3-25");
        assert_eq!(LineRange::single(7).line_count(), 1);
    }

    #[test]
    fn test_summary_formats() {
        let long = finding(LineRange::new(3, 25), Evidence::Length { lines: 23 });
        assert_eq!(long.summary(), "process (lines 3-25) - 23 lines");

        let dup = finding(
            LineRange::new(10, 14),
            Evidence::Duplicate { other: LineRange::new(40, 44), sample: "x".into() },
        );
        assert_eq!(dup.summary(), "Duplication: lines 10-14 ↔ 40-44");

        let params = finding(LineRange::new(5, 9), Evidence::Parameters { count: 7 });
        assert_eq!(params.summary(), "process (line 5) - 7 parameters");

        let envy = finding(LineRange::new(5, 9), Evidence::Access { external: 4, internal: 1 });
        assert_eq!(envy.summary(), "process (line 5) - external: 4, internal: 1");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Syntax { line: 3, column: 9 };
        assert_eq!(err.to_string(), "syntax error at line 3, column 9");
    }
}
