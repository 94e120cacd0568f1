//! 规则定义
//!
//! 所有异味在此集中定义，确保单一数据源

use super::{Category, RuleDefinition, SmellKind};

/// 获取所有规则定义
pub fn all_rules() -> Vec<RuleDefinition> {
    let mut rules = Vec::new();

    // === 膨胀类 ===
    rules.extend(bloater_rules());

    // === 冗余类 ===
    rules.extend(dispensable_rules());

    // === 可读性 ===
    rules.extend(readability_rules());

    // === 耦合类 ===
    rules.extend(coupler_rules());

    rules
}

// ============================================================================
// 膨胀类
// ============================================================================

fn bloater_rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition {
            smell: SmellKind::LongMethod,
            title: "Long Method",
            category: Category::Bloater,
            description: "A function or method whose body spans too many lines.",
            rationale: "Long functions mix several responsibilities, are hard to name, \
                        hard to test in isolation and tend to grow further.",
            detection: "Counts the lines from the `def` line to the last line of the body \
                        (decorators excluded). Reported when the count exceeds `max_lines` \
                        (default 20).",
            fix_suggestion: "Extract cohesive steps into well-named helper functions.",
        },
        RuleDefinition {
            smell: SmellKind::GodClass,
            title: "God Class",
            category: Category::Bloater,
            description: "A class that declares too many methods or class attributes.",
            rationale: "A class that knows and does too much becomes the place every change \
                        lands in, and every change risks breaking unrelated behaviour.",
            detection: "Counts methods defined directly in the class body and class-level \
                        assignments to plain names. Reported when methods exceed \
                        `max_methods` (default 8) or attributes exceed `max_attrs` (default 6).",
            fix_suggestion: "Split the class along its responsibilities; move data and the \
                             behaviour that uses it into smaller collaborating classes.",
        },
        RuleDefinition {
            smell: SmellKind::LargeParameterList,
            title: "Large Parameter List",
            category: Category::Bloater,
            description: "A function that takes too many parameters.",
            rationale: "Long parameter lists are easy to call wrongly and usually signal \
                        that several values belong together.",
            detection: "Counts every parameter including `*args` and `**kwargs`, not counting \
                        a leading `self` or `cls`. Reported when the count exceeds \
                        `max_parameters` (default 5).",
            fix_suggestion: "Introduce a parameter object or dataclass, or pass the object the \
                             values come from.",
        },
    ]
}

// ============================================================================
// 冗余类
// ============================================================================

fn dispensable_rules() -> Vec<RuleDefinition> {
    vec![RuleDefinition {
        smell: SmellKind::DuplicatedCode,
        title: "Duplicated Code",
        category: Category::Dispensable,
        description: "The same block of lines appears more than once in a file.",
        rationale: "Every copy has to be found and changed together; copies drift apart \
                    and bugs get fixed in only one of them.",
        detection: "Compares every window of `min_duplication_lines` consecutive lines \
                    (default 5) with the windows after it. At most `max_reports` \
                    duplications (default 10) are reported per file.",
        fix_suggestion: "Extract the shared block into a function and call it from both places.",
    }]
}

// ============================================================================
// 可读性
// ============================================================================

fn readability_rules() -> Vec<RuleDefinition> {
    vec![RuleDefinition {
        smell: SmellKind::MagicNumbers,
        title: "Magic Numbers",
        category: Category::Readability,
        description: "Numeric literals whose meaning is not explained by a name.",
        rationale: "A bare `0.25` says nothing about being a tax rate; the same value \
                    repeated in several places must be changed everywhere at once.",
        detection: "Reports every integer or float literal in code (strings and comments \
                    are ignored) whose value is not in `excluded_numbers` \
                    (default 0, 1, -1, 100).",
        fix_suggestion: "Replace the literal with a named module-level constant or an enum.",
    }]
}

// ============================================================================
// 耦合类
// ============================================================================

fn coupler_rules() -> Vec<RuleDefinition> {
    vec![RuleDefinition {
        smell: SmellKind::FeatureEnvy,
        title: "Feature Envy",
        category: Category::Coupler,
        description: "A method more interested in another object's data than in its own.",
        rationale: "Behaviour that lives away from the data it uses couples classes \
                    together and scatters a single concept across the codebase.",
        detection: "For methods (first parameter `self` or `cls`) counts `self.x` / `cls.x` \
                    accesses as internal and `other.x` accesses as external. Reported when \
                    external accesses outnumber internal ones and reach \
                    `min_external_accesses` (default 3).",
        fix_suggestion: "Move the method, or the envious part of it, to the class whose \
                         data it uses.",
    }]
}
