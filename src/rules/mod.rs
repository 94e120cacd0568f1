//! 规则注册中心 (Smell Registry)
//!
//! 六种代码异味的统一定义:
//! 1. 单一数据源 - SmellKind 是所有模块共享的标识
//! 2. 规则抑制 - 支持 `# smell-ignore` 注释
//! 3. 文档生成 - 可从规则定义生成 markdown 说明文档

use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

pub mod definitions;
pub mod suppression;

/// 代码异味类型
///
/// 变体顺序即评估与报告顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SmellKind {
    LongMethod,
    GodClass,
    DuplicatedCode,
    LargeParameterList,
    MagicNumbers,
    FeatureEnvy,
}

impl SmellKind {
    /// 所有异味，按评估顺序
    pub const ALL: [SmellKind; 6] = [
        SmellKind::LongMethod,
        SmellKind::GodClass,
        SmellKind::DuplicatedCode,
        SmellKind::LargeParameterList,
        SmellKind::MagicNumbers,
        SmellKind::FeatureEnvy,
    ];

    /// 规范 ID (CamelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            SmellKind::LongMethod => "LongMethod",
            SmellKind::GodClass => "GodClass",
            SmellKind::DuplicatedCode => "DuplicatedCode",
            SmellKind::LargeParameterList => "LargeParameterList",
            SmellKind::MagicNumbers => "MagicNumbers",
            SmellKind::FeatureEnvy => "FeatureEnvy",
        }
    }
}

impl fmt::Display for SmellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的异味名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSmell(pub String);

impl fmt::Display for UnknownSmell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown smell '{}'", self.0)
    }
}

impl std::error::Error for UnknownSmell {}

impl FromStr for SmellKind {
    type Err = UnknownSmell;

    /// 接受 `LongMethod` / `longmethod` / `long_method` / `long-method`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        SmellKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == normalized)
            .ok_or_else(|| UnknownSmell(s.trim().to_string()))
    }
}

/// 异味类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// 过度膨胀的函数、类、参数列表
    Bloater,
    /// 可以删除的重复内容
    Dispensable,
    /// 类之间的过度耦合
    Coupler,
    /// 可读性问题
    Readability,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Bloater,
        Category::Dispensable,
        Category::Coupler,
        Category::Readability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bloater => "Bloater",
            Category::Dispensable => "Dispensable",
            Category::Coupler => "Coupler",
            Category::Readability => "Readability",
        }
    }
}

/// 规则定义
#[derive(Debug, Clone, Serialize)]
pub struct RuleDefinition {
    pub smell: SmellKind,
    /// 人类可读名称
    pub title: &'static str,
    pub category: Category,
    /// 简短描述
    pub description: &'static str,
    /// 详细说明 (为什么是问题)
    pub rationale: &'static str,
    /// 检测方式与默认阈值
    pub detection: &'static str,
    /// 修复建议
    pub fix_suggestion: &'static str,
}

/// 规则注册表 (按 SmellKind::ALL 顺序保存)
pub struct RuleRegistry {
    rules: Vec<RuleDefinition>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        let mut rules = definitions::all_rules();
        rules.sort_by_key(|r| r.smell);
        Self { rules }
    }

    /// 获取所有规则
    pub fn all(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    /// 获取某类别的所有规则
    pub fn by_category(&self, category: Category) -> Vec<&RuleDefinition> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// 生成 markdown 说明文档
    pub fn render_markdown(&self) -> String {
        let mut doc = String::from("# Code Smell Catalogue\n\n");
        doc.push_str(&format!(
            "The detector recognises {} smells. Each one can be enabled, disabled \
             or tuned in `config.yaml`, and filtered with `--only` / `--exclude`.\n",
            self.rules.len()
        ));

        doc.push_str("\n| Category | Smells |\n|----------|--------|\n");
        for category in Category::ALL {
            let smells: Vec<&str> = self
                .by_category(category)
                .iter()
                .map(|r| r.smell.as_str())
                .collect();
            if !smells.is_empty() {
                doc.push_str(&format!("| {} | {} |\n", category.as_str(), smells.join(", ")));
            }
        }

        for (i, rule) in self.rules.iter().enumerate() {
            doc.push_str(&format!(
                "\n## {}. {} (`{}`)\n\n\
                 **Category**: {}\n\n\
                 {}\n\n\
                 **Why it matters**: {}\n\n\
                 **Detection**: {}\n\n\
                 **Fix**: {}\n",
                i + 1,
                rule.title,
                rule.smell,
                rule.category.as_str(),
                rule.description,
                rule.rationale,
                rule.detection,
                rule.fix_suggestion,
            ));
        }

        doc
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 全局规则注册表 (延迟初始化)
pub static REGISTRY: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::new);

/// 获取全局规则注册表
pub fn registry() -> &'static RuleRegistry {
    &REGISTRY
}
