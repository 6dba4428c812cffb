//! Environment configuration.

use std::path::PathBuf;

use grimoire_bluffs::domain::slot_set::{InvalidIndexPolicy, SlotSetConfig};

use crate::error::AppError;

/// Path to the YAML character catalog. Required.
pub const CATALOG_VAR: &str = "BLUFFS_CATALOG";
/// Path to the JSON-lines script. Stdin when unset.
pub const SCRIPT_VAR: &str = "BLUFFS_SCRIPT";
/// `fail` or `clamp`. Defaults to `fail`.
pub const INVALID_INDEX_VAR: &str = "BLUFFS_INVALID_INDEX";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the character catalog lives.
    pub catalog_path: PathBuf,
    /// Where the script lives; `None` reads stdin.
    pub script_path: Option<PathBuf>,
    /// Options for every slot set the collection creates.
    pub slot_set: SlotSetConfig,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog_path = lookup(CATALOG_VAR).map(PathBuf::from).ok_or_else(|| {
            AppError::Config(format!("{CATALOG_VAR} environment variable must be set"))
        })?;
        let script_path = lookup(SCRIPT_VAR).map(PathBuf::from);
        let on_invalid_index = match lookup(INVALID_INDEX_VAR).as_deref() {
            None | Some("fail") => InvalidIndexPolicy::Fail,
            Some("clamp") => InvalidIndexPolicy::Clamp,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{INVALID_INDEX_VAR} must be 'fail' or 'clamp', got '{other}'"
                )));
            }
        };
        Ok(Self {
            catalog_path,
            script_path,
            slot_set: SlotSetConfig { on_invalid_index },
        })
    }
}
