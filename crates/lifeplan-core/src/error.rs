//! Error types for the planner repository and its settings store.

use thiserror::Error;
use uuid::Uuid;

/// Rule violations raised by [`ValidationRules`](crate::ValidationRules).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("goal text is empty")]
    EmptyContent,

    #[error("goal text is {len} characters (limit {max})")]
    ContentTooLong { len: usize, max: usize },

    #[error("domain {domain} already holds {max} goals")]
    TooManyGoals { domain: &'static str, max: usize },
}

/// Errors returned by [`PlannerRepository`](crate::PlannerRepository) operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Update, delete or score referencing an id that is not in the owning list.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// A profile-owned record was mutated before any profile was saved.
    #[error("no profile has been saved yet")]
    NoProfile,

    /// Odyssey plans hold exactly five years (indices 0..=4).
    #[error("plan year index {0} is out of range (0..5)")]
    YearOutOfRange(usize),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to decode '{key}': {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings store error: {0}")]
    Storage(#[from] sled::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PlannerError {
    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// True for [`PlannerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
