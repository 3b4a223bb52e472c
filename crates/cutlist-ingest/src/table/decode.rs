//! Text decoding with a fixed fallback order.

use std::fmt;

use encoding_rs::{SHIFT_JIS, UTF_8};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encodings tried, in order, when decoding an order file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 with an optional byte-order mark.
    Utf8Bom,
    /// Plain UTF-8.
    Utf8,
    /// Shift_JIS as written by Japanese Windows (cp932).
    ShiftJis,
}

impl SourceEncoding {
    pub const FALLBACK_ORDER: [SourceEncoding; 3] =
        [SourceEncoding::Utf8Bom, SourceEncoding::Utf8, SourceEncoding::ShiftJis];

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8Bom => "utf-8-sig",
            Self::Utf8 => "utf-8",
            Self::ShiftJis => "cp932",
        }
    }

    /// Strict decode; malformed input yields `None` rather than
    /// replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let decoded = match self {
            Self::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::ShiftJis => SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes),
        };
        decoded.map(|text| text.into_owned())
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes bytes with the first encoding in [`SourceEncoding::FALLBACK_ORDER`]
/// that accepts them.
pub fn decode_text(bytes: &[u8]) -> Option<(String, SourceEncoding)> {
    SourceEncoding::FALLBACK_ORDER
        .into_iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, encoding)))
}
