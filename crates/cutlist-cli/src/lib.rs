//! CLI library components for the cut-list checker.

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod settings;
