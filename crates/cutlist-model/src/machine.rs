//! Machine code tables.
//!
//! Machine codes are compared as normalized strings (see
//! `cutlist_common::code_value`), so `"41"`, `"４１"` and `"41.0"` all match
//! the plasma entry.

/// Plasma cutter. Relief cut-outs are not allowed.
pub const PLASMA: &str = "41";

/// Diamond/splice machines; these must cut to dimension.
pub const DIA_SPLICE: [&str; 5] = ["50", "51", "52", "53", "54"];

/// Diamond/splice machines that also require comment 33 when rust removal is set.
pub const DIA_SPLICE_MAIN: [&str; 4] = ["50", "51", "52", "53"];

/// Filler machines; relief diameters must be raised to a `.5` value.
pub const FILLER: [&str; 2] = ["52", "53"];

/// Drilling line; a row must not mix drill sizes.
pub const DRILL_CHECK: &str = "54";

/// Machines the shot comment rule looks at.
pub const SHOT_RULE: [&str; 6] = ["40", "41", "42", "43", "44", "45"];

/// Machines the shot-mix file rules extract hole sizes from.
pub const SHOT_MIX: [&str; 5] = ["41", "42", "43", "44", "45"];

/// Allowed plate thickness for a machine, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Message stem naming the machine family and its requirement.
    pub requirement: &'static str,
}

const GAS: ThicknessRange = ThicknessRange {
    min: Some(16.0),
    max: None,
    requirement: "機種ガスは板厚16以上が条件",
};

const PLASMA_RANGE: ThicknessRange = ThicknessRange {
    min: Some(6.0),
    max: Some(40.0),
    requirement: "機種プラズマは板厚6以上40まで",
};

const LASER: ThicknessRange = ThicknessRange {
    min: None,
    max: Some(12.0),
    requirement: "機種レーザーは板厚12まで",
};

const FILLER_RANGE: ThicknessRange = ThicknessRange {
    min: None,
    max: Some(4.5),
    requirement: "機種フィラーは板厚4.5まで",
};

/// Thickness constraint for a machine code, if the machine has one.
pub fn thickness_range(code: &str) -> Option<ThicknessRange> {
    match code {
        "40" | "54" => Some(GAS),
        "41" => Some(PLASMA_RANGE),
        "42" | "44" | "45" => Some(LASER),
        "52" | "53" => Some(FILLER_RANGE),
        _ => None,
    }
}

impl ThicknessRange {
    /// Inclusive containment with a small epsilon for float noise.
    pub fn contains(&self, thickness: f64, epsilon: f64) -> bool {
        let above_min = self.min.is_none_or(|min| thickness >= min - epsilon);
        let below_max = self.max.is_none_or(|max| thickness <= max + epsilon);
        above_min && below_max
    }
}
