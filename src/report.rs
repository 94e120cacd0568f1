//! 扫描报告
//!
//! 人类可读格式逐文件输出；`--json` 时整个 `ScanReport` 序列化输出。

use serde::Serialize;

use crate::rules::SmellKind;
use crate::scanner::Finding;

const SEPARATOR_WIDTH: usize = 80;

/// 默认每种异味展示的条数
pub const DEFAULT_MAX_PER_SMELL: usize = 5;

/// 单个文件的检测结果
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    /// 源码行数
    pub lines: usize,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn findings_for(&self, smell: SmellKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.smell == smell)
    }
}

/// 分析失败的文件 (读取失败或语法错误)
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    pub path: String,
    pub message: String,
}

/// 一次运行的完整报告
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// RFC 3339 生成时间
    pub generated_at: String,
    pub active_smells: Vec<SmellKind>,
    pub files: Vec<FileReport>,
    /// 不存在的路径
    pub skipped: Vec<String>,
    pub errors: Vec<FileError>,
}

impl ScanReport {
    pub fn new(active_smells: Vec<SmellKind>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            active_smells,
            files: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }
}

/// 渲染人类可读报告
///
/// `max_per_smell` 为 None 时展示全部条目。
pub fn render_text(report: &ScanReport, max_per_smell: Option<usize>) -> String {
    let mut out = String::new();

    for path in &report.skipped {
        out.push_str(&format!("Warning: File {path} not found, skipping...\n"));
    }
    for error in &report.errors {
        out.push_str(&format!("Error analyzing {}: {}\n", error.path, error.message));
    }

    for file in &report.files {
        out.push_str(&format!("\nFile: {}\n", file.path));
        render_file(&mut out, file, &report.active_smells, max_per_smell);
    }

    out
}

fn render_file(
    out: &mut String,
    file: &FileReport,
    active_smells: &[SmellKind],
    max_per_smell: Option<usize>,
) {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let active: Vec<&str> = active_smells.iter().map(|s| s.as_str()).collect();

    out.push_str(&format!("\n{separator}\n"));
    out.push_str("CODE SMELL DETECTION REPORT\n");
    out.push_str(&format!("{separator}\n"));
    out.push_str(&format!("Active smells evaluated: {}\n\n", active.join(", ")));

    for smell in active_smells {
        let findings: Vec<&Finding> = file.findings_for(*smell).collect();
        if findings.is_empty() {
            continue;
        }

        out.push_str(&format!("🔍 {smell}: {} found\n", findings.len()));
        let limit = max_per_smell.unwrap_or(findings.len());
        for finding in findings.iter().take(limit) {
            out.push_str(&format!("   📍 {}\n", finding.summary()));
        }
        if findings.len() > limit {
            out.push_str(&format!("   ... and {} more\n", findings.len() - limit));
        }
        out.push('\n');
    }

    if file.findings.is_empty() {
        out.push_str("✅ No code smells detected!\n");
    } else {
        out.push_str(&format!("📊 Total smells found: {}\n", file.findings.len()));
    }
    out.push_str(&format!("{separator}\n"));
}
