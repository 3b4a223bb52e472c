//! Rule names, used as configuration keys and diagnostic tags.

pub const THICKNESS_GRADE: &str = "thickness_grade";
pub const PLASMA_RELIEF: &str = "plasma_relief";
pub const DIA_DIMENSION: &str = "dia_dimension";
pub const SABI_COMMENT: &str = "sabi_comment";
pub const DIMENSION_LIMIT: &str = "dimension_limit";
pub const DECIMAL_RELIEF: &str = "decimal_relief";
pub const DRILL_FORMAT: &str = "drill_format";
pub const DRILL_MIX: &str = "drill_mix";
pub const DATE_CHECK: &str = "date_check";
pub const SHOT_DIMENSION: &str = "shot_dimension";
pub const MACHINE_THICKNESS: &str = "machine_thickness";
pub const SHOT_COMMENT: &str = "shot_comment";
pub const DRILL_WORK_SIZE: &str = "drill_work_size";
pub const ROUND_DRILL: &str = "round_drill";
pub const FILE_MIX: &str = "file_mix";
pub const GROOVE_CONSISTENCY: &str = "groove_consistency";
pub const SHOT_MIX_15_18: &str = "shot_mix_15_18";
pub const SHOT_MIX_18_22: &str = "shot_mix_18_22";

/// Every rule name, row rules first, in evaluation order.
pub const ALL: [&str; 18] = [
    THICKNESS_GRADE,
    PLASMA_RELIEF,
    DIA_DIMENSION,
    SABI_COMMENT,
    DIMENSION_LIMIT,
    DECIMAL_RELIEF,
    DRILL_FORMAT,
    DRILL_MIX,
    DATE_CHECK,
    SHOT_DIMENSION,
    MACHINE_THICKNESS,
    SHOT_COMMENT,
    DRILL_WORK_SIZE,
    ROUND_DRILL,
    FILE_MIX,
    GROOVE_CONSISTENCY,
    SHOT_MIX_15_18,
    SHOT_MIX_18_22,
];

/// Keys written by the older desktop checker's `config.json`.
const LEGACY_ALIASES: &[(&str, &[&str])] = &[
    ("plasma_nakauki", &[PLASMA_RELIEF]),
    ("decimal_nakauki", &[DECIMAL_RELIEF]),
    ("kakizaki_consistency", &[GROOVE_CONSISTENCY]),
    ("drill_check", &[DRILL_FORMAT, DRILL_MIX]),
    ("enable_shot_rule", &[SHOT_COMMENT]),
];

/// Resolves a configuration key to the canonical rule names it controls.
///
/// Returns `None` for keys that are neither a rule name nor a legacy alias.
pub fn resolve(key: &str) -> Option<Vec<&'static str>> {
    let key = key.trim();
    if let Some(name) = ALL.iter().find(|name| **name == key) {
        return Some(vec![*name]);
    }
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, names)| names.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_and_legacy() {
        assert_eq!(resolve("round_drill"), Some(vec![ROUND_DRILL]));
        assert_eq!(resolve("drill_check"), Some(vec![DRILL_FORMAT, DRILL_MIX]));
        assert_eq!(resolve("kakizaki_consistency"), Some(vec![GROOVE_CONSISTENCY]));
        assert_eq!(resolve("nope"), None);
    }
}
