//! Life wheel: eight 0–10 satisfaction scores plus a short goal list per domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::domain::LifeDomain;
use super::timestamp;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        MIN_SCORE
    } else {
        v.clamp(MIN_SCORE, MAX_SCORE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeWheelGoal {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl LifeWheelGoal {
    pub fn new(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_completed: false,
            created_at: timestamp::truncate(created_at),
        }
    }
}

/// Scores are stored as eight named fields; `goals` is keyed by domain label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeWheelAssessment {
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub career: f64,
    #[serde(default)]
    pub family: f64,
    #[serde(default)]
    pub finance: f64,
    #[serde(default)]
    pub learning: f64,
    #[serde(default)]
    pub social: f64,
    #[serde(default)]
    pub leisure: f64,
    #[serde(default)]
    pub spiritual: f64,
    #[serde(default)]
    pub goals: BTreeMap<LifeDomain, Vec<LifeWheelGoal>>,
}

impl LifeWheelAssessment {
    /// Builds an assessment from (domain, score) pairs; missing domains score 0.
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (LifeDomain, f64)>,
    {
        let mut out = Self::default();
        for (domain, score) in scores {
            out.set_score(domain, score);
        }
        out
    }

    fn slot(&self, domain: LifeDomain) -> &f64 {
        match domain {
            LifeDomain::Health => &self.health,
            LifeDomain::Career => &self.career,
            LifeDomain::Family => &self.family,
            LifeDomain::Finance => &self.finance,
            LifeDomain::Learning => &self.learning,
            LifeDomain::Social => &self.social,
            LifeDomain::Leisure => &self.leisure,
            LifeDomain::Spiritual => &self.spiritual,
        }
    }

    fn slot_mut(&mut self, domain: LifeDomain) -> &mut f64 {
        match domain {
            LifeDomain::Health => &mut self.health,
            LifeDomain::Career => &mut self.career,
            LifeDomain::Family => &mut self.family,
            LifeDomain::Finance => &mut self.finance,
            LifeDomain::Learning => &mut self.learning,
            LifeDomain::Social => &mut self.social,
            LifeDomain::Leisure => &mut self.leisure,
            LifeDomain::Spiritual => &mut self.spiritual,
        }
    }

    pub fn score(&self, domain: LifeDomain) -> f64 {
        *self.slot(domain)
    }

    /// Sets one score, clamped to [0, 10].
    pub fn set_score(&mut self, domain: LifeDomain, score: f64) {
        *self.slot_mut(domain) = clamp_score(score);
    }

    /// All scores in wheel order.
    pub fn scores(&self) -> [(LifeDomain, f64); 8] {
        LifeDomain::ALL.map(|d| (d, self.score(d)))
    }

    /// Arithmetic mean of the eight scores.
    pub fn average(&self) -> f64 {
        self.scores().iter().map(|(_, s)| s).sum::<f64>() / 8.0
    }

    /// Clamps every score and cuts goal timestamps to stored precision.
    pub fn clamp(&mut self) {
        for domain in LifeDomain::ALL {
            let v = self.score(domain);
            self.set_score(domain, v);
        }
        for goal in self.goals.values_mut().flatten() {
            goal.created_at = timestamp::truncate(goal.created_at);
        }
    }

    pub fn goals_for(&self, domain: LifeDomain) -> &[LifeWheelGoal] {
        self.goals.get(&domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_goal(&mut self, domain: LifeDomain, goal: LifeWheelGoal) {
        self.goals.entry(domain).or_default().push(goal);
    }

    /// Replaces the goal with the same id in `domain`. Returns false if absent.
    pub fn update_goal(&mut self, domain: LifeDomain, goal: LifeWheelGoal) -> bool {
        let Some(slot) = self
            .goals
            .get_mut(&domain)
            .and_then(|list| list.iter_mut().find(|g| g.id == goal.id))
        else {
            return false;
        };
        *slot = goal;
        true
    }

    /// Removes the goal from `domain`. Returns false if absent.
    pub fn remove_goal(&mut self, domain: LifeDomain, goal_id: Uuid) -> bool {
        let Some(list) = self.goals.get_mut(&domain) else {
            return false;
        };
        let before = list.len();
        list.retain(|g| g.id != goal_id);
        list.len() != before
    }
}
