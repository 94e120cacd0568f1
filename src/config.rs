//! 检测配置
//!
//! 合并顺序: 内置默认值 -> YAML 配置文件 -> CLI `--only` / `--exclude`。
//! 加载完成后配置只读。
//!
//! ```yaml
//! LongMethod:
//!   max_lines: 30
//! MagicNumbers:
//!   excluded_numbers: [0, 1, -1, 2, 100]
//! FeatureEnvy:
//!   enabled: false
//! ```

use std::path::Path;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::rules::SmellKind;

/// 未指定 `--config` 时尝试加载的文件
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongMethodSettings {
    pub enabled: bool,
    pub max_lines: usize,
}

impl Default for LongMethodSettings {
    fn default() -> Self {
        Self { enabled: true, max_lines: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GodClassSettings {
    pub enabled: bool,
    pub max_methods: usize,
    pub max_attrs: usize,
}

impl Default for GodClassSettings {
    fn default() -> Self {
        Self { enabled: true, max_methods: 8, max_attrs: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicatedCodeSettings {
    pub enabled: bool,
    pub min_duplication_lines: usize,
    /// 每个文件最多报告的重复数，0 表示不限制
    pub max_reports: usize,
}

impl Default for DuplicatedCodeSettings {
    fn default() -> Self {
        Self { enabled: true, min_duplication_lines: 5, max_reports: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeParameterListSettings {
    pub enabled: bool,
    pub max_parameters: usize,
}

impl Default for LargeParameterListSettings {
    fn default() -> Self {
        Self { enabled: true, max_parameters: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicNumbersSettings {
    pub enabled: bool,
    pub excluded_numbers: Vec<f64>,
}

impl Default for MagicNumbersSettings {
    fn default() -> Self {
        Self { enabled: true, excluded_numbers: vec![0.0, 1.0, -1.0, 100.0] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureEnvySettings {
    pub enabled: bool,
    pub min_external_accesses: usize,
}

impl Default for FeatureEnvySettings {
    fn default() -> Self {
        Self { enabled: true, min_external_accesses: 3 }
    }
}

/// 完整检测配置
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectorConfig {
    pub long_method: LongMethodSettings,
    pub god_class: GodClassSettings,
    pub duplicated_code: DuplicatedCodeSettings,
    pub large_parameter_list: LargeParameterListSettings,
    pub magic_numbers: MagicNumbersSettings,
    pub feature_envy: FeatureEnvySettings,
}

impl DetectorConfig {
    /// 加载配置文件
    ///
    /// 显式指定的路径必须存在；未指定时当前目录的 `config.yaml` 存在才加载。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_in(path, Path::new("."))
    }

    /// 同 `load`，默认配置文件在 `dir` 下查找
    pub fn load_in(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    bail!("Configuration file not found: {}", path.display());
                }
                Self::from_file(path)
            }
            None => {
                let default_path = dir.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    debug!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// 从 YAML 文本解析，缺省字段保留默认值
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let mut config = Self::default();
        if text.trim().is_empty() {
            return Ok(config);
        }

        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Null => return Ok(config),
            Value::Mapping(mapping) => mapping,
            _ => bail!("expected a mapping of smell names to settings"),
        };

        for (key, settings) in mapping {
            let Some(name) = key.as_str() else {
                warn!("Ignoring non-string configuration key {key:?}");
                continue;
            };
            let smell = match name.parse::<SmellKind>() {
                Ok(smell) => smell,
                Err(e) => {
                    warn!("Ignoring configuration section: {e}");
                    continue;
                }
            };
            if settings.is_null() {
                continue;
            }
            config
                .apply(smell, settings)
                .with_context(|| format!("Invalid settings for {smell}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, smell: SmellKind, settings: Value) -> Result<()> {
        match smell {
            SmellKind::LongMethod => self.long_method = serde_yaml::from_value(settings)?,
            SmellKind::GodClass => self.god_class = serde_yaml::from_value(settings)?,
            SmellKind::DuplicatedCode => self.duplicated_code = serde_yaml::from_value(settings)?,
            SmellKind::LargeParameterList => {
                self.large_parameter_list = serde_yaml::from_value(settings)?
            }
            SmellKind::MagicNumbers => self.magic_numbers = serde_yaml::from_value(settings)?,
            SmellKind::FeatureEnvy => self.feature_envy = serde_yaml::from_value(settings)?,
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.duplicated_code.min_duplication_lines == 0 {
            bail!("DuplicatedCode.min_duplication_lines must be at least 1");
        }
        Ok(())
    }

    /// 应用 CLI 过滤
    ///
    /// `only` 非空时只启用列出的异味 (即使其中没有可识别的名称)；
    /// 否则禁用 `exclude` 中列出的异味。
    pub fn with_cli_overrides(mut self, only: &[String], exclude: &[String]) -> Self {
        let only_names = non_blank(only);
        if !only_names.is_empty() {
            let selected = parse_smell_list(&only_names);
            for smell in SmellKind::ALL {
                self.set_enabled(smell, selected.contains(&smell));
            }
        } else {
            for smell in parse_smell_list(&non_blank(exclude)) {
                self.set_enabled(smell, false);
            }
        }
        self
    }

    pub fn is_enabled(&self, smell: SmellKind) -> bool {
        match smell {
            SmellKind::LongMethod => self.long_method.enabled,
            SmellKind::GodClass => self.god_class.enabled,
            SmellKind::DuplicatedCode => self.duplicated_code.enabled,
            SmellKind::LargeParameterList => self.large_parameter_list.enabled,
            SmellKind::MagicNumbers => self.magic_numbers.enabled,
            SmellKind::FeatureEnvy => self.feature_envy.enabled,
        }
    }

    fn set_enabled(&mut self, smell: SmellKind, enabled: bool) {
        match smell {
            SmellKind::LongMethod => self.long_method.enabled = enabled,
            SmellKind::GodClass => self.god_class.enabled = enabled,
            SmellKind::DuplicatedCode => self.duplicated_code.enabled = enabled,
            SmellKind::LargeParameterList => self.large_parameter_list.enabled = enabled,
            SmellKind::MagicNumbers => self.magic_numbers.enabled = enabled,
            SmellKind::FeatureEnvy => self.feature_envy.enabled = enabled,
        }
    }

    /// 启用的异味，按评估顺序
    pub fn enabled_smells(&self) -> Vec<SmellKind> {
        SmellKind::ALL.into_iter().filter(|s| self.is_enabled(*s)).collect()
    }
}

fn non_blank(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .flat_map(|n| n.split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect()
}

fn parse_smell_list(names: &[&str]) -> Vec<SmellKind> {
    names
        .iter()
        .filter_map(|name| match name.parse::<SmellKind>() {
            Ok(smell) => Some(smell),
            Err(e) => {
                warn!("Ignoring {e}");
                None
            }
        })
        .collect()
}
