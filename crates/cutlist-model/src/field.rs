//! Canonical order-file columns.

use serde::{Deserialize, Serialize};

/// A canonical order-file column, named by its header after alias mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Thickness,
    Grade,
    Width,
    Length,
    Comment,
    Drill,
    Relief,
    Machine,
    DimensionCut,
    Sabi,
    OrderDate,
    DeliveryDate,
    CutLength,
    ScribeDetail,
    GrooveK,
    GrooveV,
}

impl Field {
    /// Required columns in the order they are checked.
    pub const REQUIRED: [Field; 12] = [
        Field::Thickness,
        Field::Grade,
        Field::Width,
        Field::Length,
        Field::Comment,
        Field::Drill,
        Field::Relief,
        Field::Machine,
        Field::DimensionCut,
        Field::Sabi,
        Field::OrderDate,
        Field::DeliveryDate,
    ];

    /// Optional columns; absent ones read as empty cells.
    pub const OPTIONAL: [Field; 4] = [
        Field::CutLength,
        Field::ScribeDetail,
        Field::GrooveK,
        Field::GrooveV,
    ];

    /// Canonical header text.
    pub fn header(self) -> &'static str {
        match self {
            Self::Thickness => "板厚",
            Self::Grade => "材質",
            Self::Width => "幅",
            Self::Length => "長さ",
            Self::Comment => "コメント",
            Self::Drill => "ドリル",
            Self::Relief => "中抜き",
            Self::Machine => "機種",
            Self::DimensionCut => "寸法・型切",
            Self::Sabi => "サビ",
            Self::OrderDate => "Y",
            Self::DeliveryDate => "Z",
            Self::CutLength => "切断長",
            Self::ScribeDetail => "ケガキ詳細",
            Self::GrooveK => "開先K詳細",
            Self::GrooveV => "開先V詳細",
        }
    }

    /// Looks up a canonical field by its header text.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::REQUIRED
            .into_iter()
            .chain(Self::OPTIONAL)
            .find(|field| field.header() == header)
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        for field in Field::REQUIRED.into_iter().chain(Field::OPTIONAL) {
            assert_eq!(Field::from_header(field.header()), Some(field));
        }
        assert_eq!(Field::from_header("穴詳細"), None);
    }

    #[test]
    fn test_required_split() {
        assert!(Field::Relief.is_required());
        assert!(!Field::CutLength.is_required());
    }
}
