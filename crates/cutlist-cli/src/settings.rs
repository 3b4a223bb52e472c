//! Settings persistence.
//!
//! Settings are stored as TOML in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.cutlist.Cutlist Checker/
//! - Windows: %APPDATA%/cutlist/Cutlist Checker/config/
//! - Linux: ~/.config/cutlistchecker/
//!
//! An explicit `--config` file may also be the `config.json` written by the
//! older desktop checker; its rule toggles and shot parameters are carried
//! over, window state is ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cutlist_model::{RuleSettings, ShotRuleSettings, rule_names};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "cutlist";
const APP_NAME: &str = "Cutlist Checker";
const CONFIG_FILENAME: &str = "settings.toml";

/// Worker count when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Persisted CLI settings.
///
/// ```toml
/// master = "/data/規格板厚マスタ.xlsx"
/// workers = 4
///
/// [rules]
/// round_drill = false
///
/// [shot_rule]
/// a = 15.0
/// b = 18.0
/// c = 2
/// ignore_when_relief_at_least_38 = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<PathBuf>,
    pub workers: usize,
    pub rules: BTreeMap<String, bool>,
    pub shot_rule: ShotRuleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master: None,
            workers: DEFAULT_WORKERS,
            rules: BTreeMap::new(),
            shot_rule: ShotRuleSettings::default(),
        }
    }
}

impl Settings {
    /// Rule toggles and shot parameters, ready for validation.
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            rules: self.rules.clone(),
            shot_rule: self.shot_rule,
        }
    }
}

/// Failure to read an explicitly named settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("shot rule value '{value}' is not a number")]
    NotANumber { value: String },
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from the platform config folder.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be read or parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("could not determine settings path, using defaults");
        return Settings::default();
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "no settings file found, using defaults");
        return Settings::default();
    }
    match load_settings_from(&path) {
        Ok(settings) => {
            tracing::info!(path = %path.display(), "loaded settings");
            settings
        }
        Err(error) => {
            tracing::warn!(%error, "ignoring settings file, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from an explicit file. `.json` files are read as the
/// legacy desktop configuration, everything else as TOML.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let legacy: LegacyConfig =
            serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        legacy.into_settings()
    } else {
        toml::from_str(&content).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Write settings as TOML, creating the parent directory if needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let write_error = |source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(write_error)
}

/// `config.json` as written by the desktop checker.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyConfig {
    check_rules: BTreeMap<String, bool>,
    shot_abc_rule: Option<LegacyShotRule>,
    enable_shot_rule: Option<bool>,
    ignore_shot_when_nak_over38: Option<bool>,
    max_workers: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct LegacyShotRule {
    a: LegacyNumber,
    b: LegacyNumber,
    c: LegacyNumber,
    #[serde(default)]
    ignore_nak_over_38: Option<bool>,
}

/// The desktop checker stored A/B/C either as numbers or as entry text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyNumber {
    Number(f64),
    Text(String),
}

impl LegacyNumber {
    fn value(&self) -> Result<f64, SettingsError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| SettingsError::NotANumber {
                    value: text.clone(),
                }),
        }
    }
}

impl LegacyConfig {
    fn into_settings(self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::default();

        for (key, enabled) in self.check_rules {
            if rule_names::resolve(&key).is_some() {
                settings.rules.insert(key, enabled);
            } else {
                tracing::warn!(key = %key, "ignoring unknown rule in legacy config");
            }
        }
        if let Some(enabled) = self.enable_shot_rule {
            settings
                .rules
                .insert(rule_names::SHOT_COMMENT.to_string(), enabled);
        }

        if let Some(rule) = &self.shot_abc_rule {
            settings.shot_rule.a = rule.a.value()?;
            settings.shot_rule.b = rule.b.value()?;
            settings.shot_rule.c = rule.c.value()?.trunc() as i64;
            if let Some(ignore) = rule.ignore_nak_over_38 {
                settings.shot_rule.ignore_when_relief_at_least_38 = ignore;
            }
        }
        if let Some(ignore) = self.ignore_shot_when_nak_over38 {
            settings.shot_rule.ignore_when_relief_at_least_38 = ignore;
        }
        if let Some(workers) = self.max_workers {
            settings.workers = workers;
        }
        Ok(settings)
    }
}
