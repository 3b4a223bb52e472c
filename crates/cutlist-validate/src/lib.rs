//! Cut-list order validation.
//!
//! # Features
//!
//! - **Compound Fields**: one tokenizer for drill and relief cells
//! - **Row Rules**: fourteen per-row checks in a fixed order
//! - **File Rules**: presence mix, groove consistency and shot-size mix
//! - **Registry**: rule objects filtered by the enable map
//! - **Engine**: structural checks, then rules, in a stable diagnostic order
//!
//! # Example
//!
//! ```ignore
//! use cutlist_validate::{RuleContext, ValidationEngine};
//!
//! let ctx = RuleContext::new(&inventory, &config, today);
//! let engine = ValidationEngine::new(&config);
//! for diagnostic in engine.validate_path(path, &ctx) {
//!     println!("{diagnostic}");
//! }
//! ```

pub mod dates;
mod engine;
mod error;
pub mod parser;
pub mod rules;

pub use engine::{ValidationEngine, validate, validate_bytes, validate_path};
pub use error::RuleError;
pub use parser::{DrillFormatError, DrillTokenError, HolePair};
pub use rules::{FileRule, RowRule, RuleContext, RuleDescriptor, RuleRegistry, RuleScope};
