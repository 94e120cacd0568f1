//! AST Engine - Python 代码异味扫描引擎
//!
//! 1. 展开 CLI 路径 (目录递归收集 `*.py`，文件直接分析)
//! 2. 并行分析文件 (rayon)，每个线程复用自己的 Parser
//! 3. 汇总为 `ScanReport`，文件顺序与输入顺序一致

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DetectorConfig;
use crate::report::{FileError, FileReport, ScanReport};
use crate::scanner::CodeAnalyzer;
use crate::scanner::tree_sitter_python::PythonTreeSitterAnalyzer;

/// 待分析的路径集合
#[derive(Debug, Default)]
struct ScanTargets {
    files: Vec<PathBuf>,
    missing: Vec<String>,
}

/// 扫描多个路径
///
/// 不存在的路径记入 `skipped`，单个文件的读取或解析失败记入 `errors`，
/// 均不中断其余文件的分析。
pub fn scan_paths(paths: &[PathBuf], config: &DetectorConfig) -> Result<ScanReport> {
    let analyzer = PythonTreeSitterAnalyzer::new(config)?;
    let targets = collect_targets(paths, analyzer.supported_extension());

    let mut report = ScanReport::new(config.enabled_smells());
    report.skipped = targets.missing;

    debug!("Analyzing {} file(s)", targets.files.len());

    // collect 保持输入顺序
    let outcomes: Vec<Result<FileReport, FileError>> = targets
        .files
        .par_iter()
        .map(|path| analyze_file(&analyzer, path))
        .collect();

    for outcome in outcomes {
        match outcome {
            Ok(file_report) => report.files.push(file_report),
            Err(error) => report.errors.push(error),
        }
    }

    Ok(report)
}

/// 单文件扫描 (源码已在内存中)
pub fn scan_source_code(code: &str, file_path: &str, config: &DetectorConfig) -> Result<FileReport> {
    let analyzer = PythonTreeSitterAnalyzer::new(config)?;
    let findings = analyzer
        .analyze(code, Path::new(file_path))
        .with_context(|| format!("Failed to analyze {file_path}"))?;

    Ok(FileReport {
        path: file_path.to_string(),
        lines: count_lines(code),
        findings,
    })
}

fn collect_targets(paths: &[PathBuf], extension: &str) -> ScanTargets {
    let mut targets = ScanTargets::default();

    for path in paths {
        if path.is_dir() {
            let files = WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().and_then(|ext| ext.to_str()) == Some(extension))
                .map(|e| e.into_path());
            targets.files.extend(files);
        } else if path.is_file() {
            // 显式指定的文件不检查扩展名
            targets.files.push(path.clone());
        } else {
            warn!("File {} not found, skipping", path.display());
            targets.missing.push(path.display().to_string());
        }
    }

    targets
}

fn analyze_file(analyzer: &PythonTreeSitterAnalyzer, path: &Path) -> Result<FileReport, FileError> {
    let path_str = path.display().to_string();
    debug!("Analyzing {}...", path_str);

    let file_error = |message: String| FileError { path: path_str.clone(), message };

    let code = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let findings = analyzer
        .analyze(&code, path)
        .map_err(|e| file_error(e.to_string()))?;

    Ok(FileReport {
        path: path_str.clone(),
        lines: count_lines(&code),
        findings,
    })
}

/// 源码行数 (末行无换行符时也计入)
pub fn count_lines(code: &str) -> usize {
    let bytes = code.as_bytes();
    let newlines = memchr::memchr_iter(b'\n', bytes).count();
    match bytes.last() {
        None => 0,
        Some(b'\n') => newlines,
        Some(_) => newlines + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SmellKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("a = 1"), 1);
        assert_eq!(count_lines("a = 1\n"), 1);
        assert_eq!(count_lines("a = 1\nb = 2"), 2);
        assert_eq!(count_lines("\n\n"), 2);
    }

    #[test]
    fn test_collect_targets_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("b.py"), "").unwrap();
        fs::write(dir.path().join("a.py"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("pkg").join("c.py"), "").unwrap();

        let targets = collect_targets(&[dir.path().to_path_buf()], "py");
        let names: Vec<String> = targets
            .files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a.py", "b.py", "pkg/c.py"]);
        assert!(targets.missing.is_empty());
    }

    #[test]
    fn test_collect_targets_keeps_order_and_missing() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("script");
        let module = dir.path().join("module.py");
        fs::write(&script, "").unwrap();
        fs::write(&module, "").unwrap();
        let missing = dir.path().join("missing.py");

        let targets = collect_targets(&[module.clone(), missing.clone(), script.clone()], "py");
        assert_eq!(targets.files, vec![module, script]);
        assert_eq!(targets.missing, vec![missing.display().to_string()]);
    }

    #[test]
    fn test_scan_paths_records_errors() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.py");
        let bad = dir.path().join("bad.py");
        fs::write(&good, "def f(a, b, c, d, e, f):\n    return a\n").unwrap();
        fs::write(&bad, "def broken(:\n    pass\n").unwrap();

        let report = scan_paths(&[bad, good], &DetectorConfig::default()).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].lines, 2);
        assert_eq!(report.files[0].findings[0].smell, SmellKind::LargeParameterList);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].path.ends_with("bad.py"));
        assert!(report.errors[0].message.contains("syntax error at line 1"));
    }

    #[test]
    fn test_scan_source_code() {
        let config = DetectorConfig::default().with_cli_overrides(&["MagicNumbers".to_string()], &[]);
        let report = scan_source_code("rate = 0.07\n", "rates.py", &config).unwrap();

        assert_eq!(report.path, "rates.py");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].lines.start, 1);
    }
}
