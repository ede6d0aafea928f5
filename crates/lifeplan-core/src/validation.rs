//! Validation rules for user-entered planner content.
//!
//! The limits are configuration, not constants: `max_goal_chars` and
//! `max_goals_per_domain` bound the life-wheel goal lists, and the core-value
//! range drives the card-sorting guidance.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::LifeDomain;

fn default_max_goal_chars() -> usize {
    50
}

fn default_max_goals_per_domain() -> usize {
    5
}

fn default_core_values_min() -> usize {
    5
}

fn default_core_values_max() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Longest accepted life-wheel goal text, in characters (not bytes).
    #[serde(default = "default_max_goal_chars")]
    pub max_goal_chars: usize,
    #[serde(default = "default_max_goals_per_domain")]
    pub max_goals_per_domain: usize,
    /// Recommended number of cards sorted into the core category.
    #[serde(default = "default_core_values_min")]
    pub core_values_min: usize,
    #[serde(default = "default_core_values_max")]
    pub core_values_max: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_goal_chars: default_max_goal_chars(),
            max_goals_per_domain: default_max_goals_per_domain(),
            core_values_min: default_core_values_min(),
            core_values_max: default_core_values_max(),
        }
    }
}

/// Where the current core-card count sits relative to the recommended range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreSelection {
    /// This many more cards are needed to reach the minimum.
    NeedMore(usize),
    /// Count is inside the range.
    Within(usize),
    /// This many cards should be removed to get back under the maximum.
    TooMany(usize),
}

impl ValidationRules {
    /// Repairs nonsensical limits (zero lengths, inverted ranges).
    pub fn clamp(&mut self) {
        self.max_goal_chars = self.max_goal_chars.max(1);
        self.max_goals_per_domain = self.max_goals_per_domain.max(1);
        if self.core_values_min > self.core_values_max {
            std::mem::swap(&mut self.core_values_min, &mut self.core_values_max);
        }
    }

    /// Checks goal text against the length rule. Surrounding whitespace is ignored.
    pub fn check_goal_content(&self, content: &str) -> Result<(), ValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let len = trimmed.chars().count();
        if len > self.max_goal_chars {
            return Err(ValidationError::ContentTooLong {
                len,
                max: self.max_goal_chars,
            });
        }
        Ok(())
    }

    /// Checks that one more goal fits into a domain already holding `existing`.
    pub fn check_goal_capacity(
        &self,
        domain: LifeDomain,
        existing: usize,
    ) -> Result<(), ValidationError> {
        if existing >= self.max_goals_per_domain {
            return Err(ValidationError::TooManyGoals {
                domain: domain.key(),
                max: self.max_goals_per_domain,
            });
        }
        Ok(())
    }

    pub fn core_selection(&self, core_count: usize) -> CoreSelection {
        if core_count < self.core_values_min {
            CoreSelection::NeedMore(self.core_values_min - core_count)
        } else if core_count > self.core_values_max {
            CoreSelection::TooMany(core_count - self.core_values_max)
        } else {
            CoreSelection::Within(core_count)
        }
    }
}
