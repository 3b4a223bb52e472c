//! Grade / thickness inventory.

use std::collections::BTreeMap;

use cutlist_common::{normalize_cell, parse_number, round_to};

use crate::error::InventoryError;

/// Header of the grade column in the inventory master.
pub const GRADE_HEADER: &str = "規格";

/// Thickness values start at this column; the column between grade and the
/// first thickness is ignored.
pub const FIRST_THICKNESS_COLUMN: usize = 2;

/// Allowed distance between an ordered thickness and a stocked one, in mm.
pub const THICKNESS_TOLERANCE: f64 = 1e-3;

/// Grades mapped to their sorted, de-duplicated stocked thicknesses.
///
/// Built once per run and shared read-only across workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryMaster {
    grades: BTreeMap<String, Vec<f64>>,
}

impl InventoryMaster {
    /// Builds the inventory from a header row and data rows.
    ///
    /// Rows with an empty or `nan` grade are skipped. Cells from the third
    /// column on are parsed as numbers; non-numeric cells are ignored.
    /// Values are rounded to three decimals.
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self, InventoryError> {
        let grade_index = headers
            .iter()
            .position(|header| header.trim() == GRADE_HEADER)
            .ok_or(InventoryError::MissingGradeColumn)?;

        let mut grades: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for row in rows {
            let grade = normalize_cell(row.get(grade_index).map_or("", String::as_str));
            if grade.is_empty() || grade.eq_ignore_ascii_case("nan") {
                continue;
            }
            let values = row
                .iter()
                .skip(FIRST_THICKNESS_COLUMN)
                .filter_map(|cell| parse_number(cell))
                .map(|value| round_to(value, 3));
            grades.entry(grade).or_default().extend(values);
        }

        grades.retain(|_, values| !values.is_empty());
        if grades.is_empty() {
            return Err(InventoryError::NoThickness);
        }
        for values in grades.values_mut() {
            values.sort_by(f64::total_cmp);
            values.dedup();
        }
        Ok(Self { grades })
    }

    /// Builds an inventory directly from grade/thickness pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a [f64])>,
    ) -> Result<Self, InventoryError> {
        let headers = vec![GRADE_HEADER.to_string(), String::new()];
        let rows: Vec<Vec<String>> = pairs
            .into_iter()
            .map(|(grade, values)| {
                let mut row = vec![grade.to_string(), String::new()];
                row.extend(values.iter().map(f64::to_string));
                row
            })
            .collect();
        Self::from_table(&headers, &rows)
    }

    /// True when `grade` is stocked in a thickness within tolerance.
    ///
    /// The tolerance is inclusive and compared on the raw `f64` difference,
    /// so `3.001` matches a stocked `3.0` while `4.501` (a difference of
    /// `0.0010000000000003` in binary) does not match `4.5`.
    pub fn is_allowed(&self, grade: &str, thickness: f64) -> bool {
        let Some(allowed) = self.grades.get(&normalize_cell(grade)) else {
            return false;
        };
        allowed
            .iter()
            .any(|stocked| (thickness - stocked).abs() <= THICKNESS_TOLERANCE)
    }

    pub fn thicknesses(&self, grade: &str) -> Option<&[f64]> {
        self.grades.get(&normalize_cell(grade)).map(Vec::as_slice)
    }

    pub fn grade_count(&self) -> usize {
        self.grades.len()
    }

    pub fn thickness_count(&self) -> usize {
        self.grades.values().map(Vec::len).sum()
    }
}
