//! CLI 模式处理器
//!
//! 默认输出人类可读报告，使用 --json 参数可输出 JSON 格式

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use serde_json::{json, Value};
use tracing::debug;

use crate::ast_engine;
use crate::config::DetectorConfig;
use crate::report::{self, DEFAULT_MAX_PER_SMELL};
use crate::rules::registry;

/// Python Code Smell Detector
///
/// 检测 Python 源码中的六种代码异味
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 待分析的 Python 文件或目录
    #[arg(required_unless_present = "describe")]
    pub paths: Vec<PathBuf>,

    /// YAML 配置文件 (默认尝试 ./config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 只检测这些异味 (逗号分隔)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// 不检测这些异味 (逗号分隔)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,

    /// 显示每种异味的全部条目
    #[arg(long)]
    pub full: bool,

    /// 每种异味最多显示的条目数
    #[arg(long, default_value_t = DEFAULT_MAX_PER_SMELL)]
    pub max_per_smell: usize,

    /// 输出异味说明文档 (markdown)
    #[arg(long)]
    pub describe: bool,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// 日志过滤级别，--verbose 优先
    pub fn log_filter(&self) -> &str {
        if self.verbose { "debug" } else { self.log_level.as_str() }
    }
}

/// 执行一次运行，返回待输出的值
///
/// 人类可读模式下返回字符串，JSON 模式下返回结构化数据。
pub fn execute(args: &Args) -> Result<Value> {
    if args.describe {
        let catalogue = registry();
        if args.json {
            let rules: Vec<_> = catalogue.all().collect();
            return Ok(serde_json::to_value(rules)?);
        }
        return Ok(json!(catalogue.render_markdown()));
    }

    let config = DetectorConfig::load(args.config.as_deref())?
        .with_cli_overrides(&args.only, &args.exclude);

    let active: Vec<&str> = config.enabled_smells().iter().map(|s| s.as_str()).collect();
    debug!("Active smells: {}", active.join(", "));

    let scan = ast_engine::scan_paths(&args.paths, &config)?;

    if args.json {
        Ok(serde_json::to_value(&scan)?)
    } else {
        let limit = if args.full { None } else { Some(args.max_per_smell) };
        Ok(json!(report::render_text(&scan, limit)))
    }
}

/// 处理 CLI 命令并输出结果
///
/// 出错时退出码为 1；人类可读模式下错误写入 stderr。
pub fn handle_command(args: &Args) -> Result<()> {
    let result = execute(args);
    let output = render_output(&result, args.json)?;

    match result {
        Ok(_) => print!("{output}"),
        Err(_) => {
            if args.json {
                print!("{output}");
            } else {
                eprint!("{output}");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 渲染最终输出
///
/// JSON 格式包装 success 字段: `{"success": true, "data": ..}` /
/// `{"success": false, "error": ..}`；人类可读格式字符串原样输出。
pub fn render_output(result: &Result<Value>, json_output: bool) -> Result<String> {
    let output = match (result, json_output) {
        (Ok(value), true) => {
            let envelope = json!({
                "success": true,
                "data": value
            });
            format!("{}\n", serde_json::to_string_pretty(&envelope)?)
        }
        (Err(e), true) => {
            let envelope = json!({
                "success": false,
                "error": format!("{e:#}")
            });
            format!("{}\n", serde_json::to_string_pretty(&envelope)?)
        }
        (Ok(Value::String(s)), false) => s.clone(),
        (Ok(value), false) => format!("{}\n", serde_json::to_string_pretty(value)?),
        (Err(e), false) => format!("Error: {e:#}\n"),
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("smell-detector").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_lists() {
        let args = parse(&["a.py", "b.py", "--only", "LongMethod,GodClass", "--exclude", "FeatureEnvy"]);
        assert_eq!(args.paths, vec![PathBuf::from("a.py"), PathBuf::from("b.py")]);
        assert_eq!(args.only, vec!["LongMethod", "GodClass"]);
        assert_eq!(args.exclude, vec!["FeatureEnvy"]);
        assert_eq!(args.max_per_smell, 5);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let args = parse(&["-v", "a.py", "--log-level", "warn"]);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_paths_required_without_describe() {
        assert!(Args::try_parse_from(["smell-detector"]).is_err());
        assert!(Args::try_parse_from(["smell-detector", "--describe"]).is_ok());
    }

    #[test]
    fn test_execute_describe() {
        let value = execute(&parse(&["--describe"])).unwrap();
        let text = value.as_str().unwrap();
        assert!(text.starts_with("# Code Smell Catalogue"));
        assert!(text.contains("FeatureEnvy"));

        let value = execute(&parse(&["--describe", "--json"])).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_execute_scan_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("orders.py");
        fs::write(&file, "TAX = 0.2\n").unwrap();
        let config = dir.path().join("smells.yaml");
        fs::write(&config, "MagicNumbers:\n  excluded_numbers: [0.2]\n").unwrap();

        let file_arg = file.to_string_lossy().to_string();
        let config_arg = config.to_string_lossy().to_string();

        let value = execute(&parse(&[file_arg.as_str(), "--json", "--config", config_arg.as_str()])).unwrap();
        assert_eq!(value["files"][0]["findings"].as_array().unwrap().len(), 0);

        let value = execute(&parse(&[file_arg.as_str(), "--json", "--exclude", "LongMethod"])).unwrap();
        assert_eq!(value["files"][0]["findings"][0]["smell"], "MagicNumbers");
        assert_eq!(value["active_smells"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_render_output_envelope() {
        let ok = render_output(&Ok(json!({"files": []})), true).unwrap();
        let value: Value = serde_json::from_str(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["files"], json!([]));

        let failed: Result<Value> = Err(anyhow::anyhow!("Configuration file not found: nope.yaml"));
        let err = render_output(&failed, true).unwrap();
        let value: Value = serde_json::from_str(&err).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Configuration file not found: nope.yaml");
        assert!(value.get("data").is_none());

        assert_eq!(
            render_output(&failed, false).unwrap(),
            "Error: Configuration file not found: nope.yaml\n"
        );
        assert_eq!(render_output(&Ok(json!("report\n")), false).unwrap(), "report\n");
    }

    #[test]
    fn test_fatal_error_rendered_as_json() {
        let dir = tempdir().unwrap();
        let config_arg = dir.path().join("nope.yaml").to_string_lossy().to_string();
        let args = parse(&["a.py", "--json", "--config", config_arg.as_str()]);

        let output = render_output(&execute(&args), args.json).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn test_execute_missing_config_is_fatal() {
        let dir = tempdir().unwrap();
        let config_arg = dir.path().join("nope.yaml").to_string_lossy().to_string();
        assert!(execute(&parse(&["a.py", "--config", config_arg.as_str()])).is_err());
    }
}
