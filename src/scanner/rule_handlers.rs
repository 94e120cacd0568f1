// ============================================================================
// RuleHandler Trait - 异味检测处理器抽象
// ============================================================================
//
// 每种异味实现自己的 Handler，持有各自的阈值配置。
// PythonTreeSitterAnalyzer 只为启用的异味创建 Handler，
// 所有 Handler 共享同一个只读的 SourceModel。
//
// ============================================================================

use std::collections::HashMap;

use super::model::SourceModel;
use super::{Evidence, Finding, LineRange};
use crate::config::DetectorConfig;
use crate::rules::SmellKind;

/// 重复代码样本最大长度 (字符)
const MAX_SAMPLE_LEN: usize = 100;

/// 魔法数字上下文最大长度 (字符)
const MAX_CONTEXT_LEN: usize = 50;

/// 检测上下文
pub struct RuleContext<'a> {
    /// 报告中使用的文件路径
    pub file: &'a str,
}

impl RuleContext<'_> {
    fn finding(
        &self,
        smell: SmellKind,
        lines: LineRange,
        subject: Option<&str>,
        justification: String,
        evidence: Evidence,
    ) -> Finding {
        Finding {
            smell,
            file: self.file.to_string(),
            lines,
            subject: subject.map(str::to_string),
            justification,
            evidence,
        }
    }
}

/// 异味检测处理器 trait
pub trait RuleHandler: Send + Sync {
    /// 处理器负责的异味
    fn smell(&self) -> SmellKind;

    /// 检测异味，结果按起始行排序
    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding>;
}

/// 根据异味类型和配置创建处理器
pub fn create_handler(smell: SmellKind, config: &DetectorConfig) -> Box<dyn RuleHandler> {
    match smell {
        SmellKind::LongMethod => Box::new(LongMethodHandler {
            max_lines: config.long_method.max_lines,
        }),
        SmellKind::GodClass => Box::new(GodClassHandler {
            max_methods: config.god_class.max_methods,
            max_attrs: config.god_class.max_attrs,
        }),
        SmellKind::DuplicatedCode => Box::new(DuplicatedCodeHandler {
            min_lines: config.duplicated_code.min_duplication_lines,
            max_reports: config.duplicated_code.max_reports,
        }),
        SmellKind::LargeParameterList => Box::new(LargeParameterListHandler {
            max_parameters: config.large_parameter_list.max_parameters,
        }),
        SmellKind::MagicNumbers => Box::new(MagicNumbersHandler {
            excluded: config.magic_numbers.excluded_numbers.clone(),
        }),
        SmellKind::FeatureEnvy => Box::new(FeatureEnvyHandler {
            min_external: config.feature_envy.min_external_accesses,
        }),
    }
}

fn sorted(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by_key(|f| f.lines.start);
    findings
}

/// 按字符截断，超出部分以 `...` 表示
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// ============================================================================
// LongMethod
// ============================================================================

pub struct LongMethodHandler {
    pub max_lines: usize,
}

impl RuleHandler for LongMethodHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::LongMethod
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let findings = model
            .functions
            .iter()
            .filter(|f| f.lines.line_count() > self.max_lines)
            .map(|f| {
                let length = f.lines.line_count();
                let kind = if f.is_async { "async function" } else { "function" };
                ctx.finding(
                    self.smell(),
                    f.lines,
                    Some(&f.name),
                    format!(
                        "{kind} '{}' spans {length} lines, more than the limit of {}",
                        f.name, self.max_lines
                    ),
                    Evidence::Length { lines: length },
                )
            })
            .collect();

        sorted(findings)
    }
}

// ============================================================================
// GodClass
// ============================================================================

pub struct GodClassHandler {
    pub max_methods: usize,
    pub max_attrs: usize,
}

impl RuleHandler for GodClassHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::GodClass
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let findings = model
            .classes
            .iter()
            .filter(|c| c.methods.len() > self.max_methods || c.attributes.len() > self.max_attrs)
            .map(|c| {
                let methods = c.methods.len();
                let attributes = c.attributes.len();
                ctx.finding(
                    self.smell(),
                    c.lines,
                    Some(&c.name),
                    format!(
                        "class '{}' declares {methods} methods (limit {}) and {attributes} \
                         class attributes (limit {})",
                        c.name, self.max_methods, self.max_attrs
                    ),
                    Evidence::Members { methods, attributes },
                )
            })
            .collect();

        sorted(findings)
    }
}

// ============================================================================
// DuplicatedCode
// ============================================================================

/// 基于行窗口的重复检测
///
/// 每个窗口为连续 `min_lines` 行拼接后 trim 的文本；首尾为空行的窗口被跳过。
/// 对每个窗口 i，报告第一个 j >= i + min_lines 的相同窗口。
pub struct DuplicatedCodeHandler {
    pub min_lines: usize,
    /// 0 表示不限制
    pub max_reports: usize,
}

impl DuplicatedCodeHandler {
    fn window(&self, lines: &[String], start: usize) -> Option<String> {
        let block = lines[start..start + self.min_lines].join("\n");
        let trimmed = block.trim();
        if trimmed.is_empty() || trimmed.lines().count() < self.min_lines {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl RuleHandler for DuplicatedCodeHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::DuplicatedCode
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let n = self.min_lines;
        let mut findings = Vec::new();
        if n == 0 || model.lines.len() < n {
            return findings;
        }

        let windows: Vec<Option<String>> = (0..=model.lines.len() - n)
            .map(|i| self.window(&model.lines, i))
            .collect();

        // 窗口文本 -> 出现位置 (升序)
        let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, window) in windows.iter().enumerate() {
            if let Some(text) = window {
                positions.entry(text.as_str()).or_default().push(i);
            }
        }

        for (i, window) in windows.iter().enumerate() {
            let Some(text) = window else { continue };
            let Some(starts) = positions.get(text.as_str()) else { continue };

            let first_later = starts.partition_point(|&j| j < i + n);
            let Some(&j) = starts.get(first_later) else { continue };

            let lines = LineRange::new(i + 1, i + n);
            let other = LineRange::new(j + 1, j + n);
            findings.push(ctx.finding(
                self.smell(),
                lines,
                None,
                format!("lines {lines} are repeated verbatim at lines {other}"),
                Evidence::Duplicate {
                    other,
                    sample: truncate_chars(text, MAX_SAMPLE_LEN),
                },
            ));

            if self.max_reports > 0 && findings.len() >= self.max_reports {
                break;
            }
        }

        findings
    }
}

// ============================================================================
// LargeParameterList
// ============================================================================

pub struct LargeParameterListHandler {
    pub max_parameters: usize,
}

impl RuleHandler for LargeParameterListHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::LargeParameterList
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let findings = model
            .functions
            .iter()
            .filter(|f| f.parameter_count() > self.max_parameters)
            .map(|f| {
                let count = f.parameter_count();
                ctx.finding(
                    self.smell(),
                    LineRange::single(f.lines.start),
                    Some(&f.name),
                    format!(
                        "function '{}' takes {count} parameters, more than the limit of {}",
                        f.name, self.max_parameters
                    ),
                    Evidence::Parameters { count },
                )
            })
            .collect();

        sorted(findings)
    }
}

// ============================================================================
// MagicNumbers
// ============================================================================

pub struct MagicNumbersHandler {
    pub excluded: Vec<f64>,
}

impl MagicNumbersHandler {
    /// 数值或其绝对值在排除列表中
    fn is_excluded(&self, value: f64) -> bool {
        self.excluded.iter().any(|&e| e == value || e == value.abs())
    }
}

impl RuleHandler for MagicNumbersHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::MagicNumbers
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let findings = model
            .numbers
            .iter()
            .filter_map(|n| n.value.filter(|v| !self.is_excluded(*v)).map(|_| n))
            .map(|n| {
                let context = model
                    .line(n.line)
                    .map(|l| truncate_chars(l.trim(), MAX_CONTEXT_LEN))
                    .unwrap_or_default();
                ctx.finding(
                    self.smell(),
                    LineRange::single(n.line),
                    None,
                    format!("numeric literal {} has no named meaning", n.text),
                    Evidence::Literal { text: n.text.clone(), context },
                )
            })
            .collect();

        sorted(findings)
    }
}

// ============================================================================
// FeatureEnvy
// ============================================================================

/// 方法内 `self.x` / `cls.x` 为内部访问，其他 `name.x` 为外部访问。
/// 范围包含嵌套函数。
pub struct FeatureEnvyHandler {
    pub min_external: usize,
}

impl RuleHandler for FeatureEnvyHandler {
    fn smell(&self) -> SmellKind {
        SmellKind::FeatureEnvy
    }

    fn detect(&self, model: &SourceModel, ctx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for function in model.functions.iter().filter(|f| f.is_method()) {
            let mut internal = 0;
            // 外部接收者 -> 访问的属性 (按首次出现排序)
            let mut envied: Vec<(&str, Vec<&str>)> = Vec::new();

            for access in model.attributes_in(function) {
                if access.is_internal() {
                    internal += 1;
                    continue;
                }
                match envied.iter_mut().find(|(receiver, _)| *receiver == access.receiver) {
                    Some((_, attrs)) => attrs.push(access.attribute.as_str()),
                    None => envied.push((access.receiver.as_str(), vec![access.attribute.as_str()])),
                }
            }
            let external: usize = envied.iter().map(|(_, attrs)| attrs.len()).sum();

            if external > internal && external >= self.min_external {
                // 访问最多的外部对象；并列时取先出现的
                let (target, attrs) = envied
                    .iter()
                    .rev()
                    .max_by_key(|(_, attrs)| attrs.len())
                    .map(|(receiver, attrs)| (*receiver, attrs.join(", ")))
                    .unwrap_or_default();

                findings.push(ctx.finding(
                    self.smell(),
                    LineRange::single(function.lines.start),
                    Some(&function.name),
                    format!(
                        "method '{}' accesses other objects' attributes {external} times \
                         but its own only {internal} times (mostly '{target}': {attrs})",
                        function.name
                    ),
                    Evidence::Access { external, internal },
                ));
            }
        }

        sorted(findings)
    }
}
