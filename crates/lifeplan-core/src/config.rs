//! Planner configuration: storage location, event channel size and validation rules.
//!
//! | Source | Example |
//! |--------|---------|
//! | Built-in defaults | `storage_path = "./data/lifeplan"` |
//! | TOML file (`LIFEPLAN_CONFIG`, default `config/lifeplan.toml`) | `[validation] max_goal_chars = 80` |
//! | Environment (`LIFEPLAN__` prefix, `__` separator) | `LIFEPLAN__VALIDATION__MAX_GOALS_PER_DOMAIN=7` |
//!
//! Later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PlannerResult;
use crate::validation::ValidationRules;

const DEFAULT_CONFIG_PATH: &str = "config/lifeplan.toml";
const DEFAULT_STORAGE_PATH: &str = "./data/lifeplan";
const ENV_PREFIX: &str = "LIFEPLAN";

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_event_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Directory of the sled settings store.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Buffered change events per subscriber before slow receivers start lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    #[serde(default)]
    pub validation: ValidationRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            event_capacity: default_event_capacity(),
            validation: ValidationRules::default(),
        }
    }
}

impl PlannerConfig {
    /// Loads from `LIFEPLAN_CONFIG` (or `config/lifeplan.toml`) and the environment.
    pub fn load() -> PlannerResult<Self> {
        let path = std::env::var("LIFEPLAN_CONFIG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(Path::new(&path))
    }

    /// Loads from the given TOML file when it exists, then applies environment overrides.
    /// A missing file is not an error.
    pub fn load_from_path(path: &Path) -> PlannerResult<Self> {
        let builder = config::Config::builder()
            .set_default("storage_path", DEFAULT_STORAGE_PATH)?
            .set_default("event_capacity", default_event_capacity() as i64)?;

        let builder = if path.exists() {
            tracing::debug!(target: "lifeplan::config", path = %path.display(), "Loading planner config file");
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: PlannerConfig = built.try_deserialize()?;
        cfg.clamp();
        Ok(cfg)
    }

    /// Repairs values that would make the repository unusable.
    pub fn clamp(&mut self) {
        self.event_capacity = self.event_capacity.max(1);
        self.validation.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PlannerConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert!(cfg.event_capacity >= 1);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeplan.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "storage_path = \"/tmp/lifeplan-test\"").unwrap();
        writeln!(f, "[validation]").unwrap();
        writeln!(f, "max_goal_chars = 80").unwrap();
        drop(f);

        let cfg = PlannerConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.storage_path, PathBuf::from("/tmp/lifeplan-test"));
        assert_eq!(cfg.validation.max_goal_chars, 80);
    }

    #[test]
    fn environment_overrides_nested_rules() {
        std::env::set_var("LIFEPLAN__VALIDATION__CORE_VALUES_MAX", "12");
        let dir = tempfile::tempdir().unwrap();
        let cfg = PlannerConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();
        std::env::remove_var("LIFEPLAN__VALIDATION__CORE_VALUES_MAX");
        assert_eq!(cfg.validation.core_values_max, 12);
    }

    #[test]
    fn clamp_keeps_event_capacity_positive() {
        let mut cfg = PlannerConfig {
            event_capacity: 0,
            ..Default::default()
        };
        cfg.clamp();
        assert_eq!(cfg.event_capacity, 1);
    }
}
