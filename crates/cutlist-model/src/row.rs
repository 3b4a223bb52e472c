//! Parsed order rows.

use std::collections::BTreeSet;

use cutlist_common::{code_value, is_present, normalize_cell, parse_number};
use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Comment code that marks a shot-blasted piece.
pub const SHOT_COMMENT_CODE: &str = "33";

/// One data row of an order file.
///
/// Cells are stored as read (header-trimmed, otherwise raw) so messages can
/// quote what the operator typed. Accessors normalize and parse on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    /// 1-based line number; the first data row is 2.
    pub number: usize,
    pub machine_code: String,
    pub thickness: String,
    pub grade: String,
    pub width: String,
    pub length: String,
    pub comment_code: String,
    pub drill_spec: String,
    pub relief_spec: String,
    pub sabi_flag: String,
    pub dimension_cut_flag: String,
    pub order_date: String,
    pub delivery_date: String,
    pub cut_length: String,
    pub scribe_detail: String,
    pub groove_k_detail: String,
    pub groove_v_detail: String,
}

impl OrderRow {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Builder-style setter, mostly for tests and table conversion.
    #[must_use]
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: &str) {
        *self.slot_mut(field) = value.to_string();
    }

    /// Raw cell text for a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Thickness => &self.thickness,
            Field::Grade => &self.grade,
            Field::Width => &self.width,
            Field::Length => &self.length,
            Field::Comment => &self.comment_code,
            Field::Drill => &self.drill_spec,
            Field::Relief => &self.relief_spec,
            Field::Machine => &self.machine_code,
            Field::DimensionCut => &self.dimension_cut_flag,
            Field::Sabi => &self.sabi_flag,
            Field::OrderDate => &self.order_date,
            Field::DeliveryDate => &self.delivery_date,
            Field::CutLength => &self.cut_length,
            Field::ScribeDetail => &self.scribe_detail,
            Field::GrooveK => &self.groove_k_detail,
            Field::GrooveV => &self.groove_v_detail,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Thickness => &mut self.thickness,
            Field::Grade => &mut self.grade,
            Field::Width => &mut self.width,
            Field::Length => &mut self.length,
            Field::Comment => &mut self.comment_code,
            Field::Drill => &mut self.drill_spec,
            Field::Relief => &mut self.relief_spec,
            Field::Machine => &mut self.machine_code,
            Field::DimensionCut => &mut self.dimension_cut_flag,
            Field::Sabi => &mut self.sabi_flag,
            Field::OrderDate => &mut self.order_date,
            Field::DeliveryDate => &mut self.delivery_date,
            Field::CutLength => &mut self.cut_length,
            Field::ScribeDetail => &mut self.scribe_detail,
            Field::GrooveK => &mut self.groove_k_detail,
            Field::GrooveV => &mut self.groove_v_detail,
        }
    }

    /// Normalized cell text.
    pub fn text(&self, field: Field) -> String {
        normalize_cell(self.get(field))
    }

    /// Numeric value of a cell, `None` when empty or not a number.
    pub fn number_of(&self, field: Field) -> Option<f64> {
        parse_number(self.get(field))
    }

    /// True when the normalized cell is non-empty.
    pub fn has(&self, field: Field) -> bool {
        is_present(self.get(field))
    }

    /// Normalized machine code.
    pub fn machine(&self) -> String {
        code_value(&self.machine_code)
    }

    pub fn machine_in(&self, codes: &[&str]) -> bool {
        let machine = self.machine();
        codes.iter().any(|code| *code == machine)
    }

    /// Normalized comment code.
    pub fn comment(&self) -> String {
        code_value(&self.comment_code)
    }

    pub fn is_shot(&self) -> bool {
        self.comment() == SHOT_COMMENT_CODE
    }
}

/// A decoded order file ready for rule evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFile {
    /// Identifier used in diagnostics (usually the file path).
    pub name: String,
    /// Optional columns that were present in the header.
    pub optional_columns: BTreeSet<Field>,
    pub rows: Vec<OrderRow>,
}

impl OrderFile {
    pub fn new(name: impl Into<String>, rows: Vec<OrderRow>) -> Self {
        Self {
            name: name.into(),
            optional_columns: BTreeSet::new(),
            rows,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Field>) -> Self {
        self.optional_columns.extend(columns);
        self
    }

    /// Required columns are always present once a file has been built.
    pub fn has_column(&self, field: Field) -> bool {
        field.is_required() || self.optional_columns.contains(&field)
    }
}
