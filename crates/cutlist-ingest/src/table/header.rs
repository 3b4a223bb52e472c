//! Header normalization and legacy aliases.

use cutlist_common::normalize_header;
use cutlist_model::Field;

/// Legacy header spellings mapped to canonical fields.
pub const HEADER_ALIASES: &[(&str, Field)] = &[
    ("ｷﾘ穴数", Field::Drill),
    ("キリ穴数", Field::Drill),
    ("穴詳細", Field::Relief),
    ("加工機種", Field::Machine),
    ("受注日", Field::OrderDate),
    ("納入日", Field::DeliveryDate),
    ("さび出し", Field::Sabi),
];

/// Trims a header and applies the alias table.
pub fn canonical_header(raw: &str) -> String {
    let trimmed = normalize_header(raw);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map_or(trimmed, |(_, field)| field.header().to_string())
}
