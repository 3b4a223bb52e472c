pub mod config;
pub mod diagnostic;
pub mod error;
pub mod field;
pub mod inventory;
pub mod machine;
pub mod row;
pub mod rule_names;

pub use config::{RuleConfiguration, RuleSettings, ShotRule, ShotRuleSettings};
pub use diagnostic::Diagnostic;
pub use error::{ConfigError, InventoryError};
pub use field::Field;
pub use inventory::{InventoryMaster, THICKNESS_TOLERANCE};
pub use row::{OrderFile, OrderRow};
