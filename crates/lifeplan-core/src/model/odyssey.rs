//! Odyssey plans: five-year plans with yearly goals/milestones/actions and a
//! self-score history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Number of yearly slots in every plan.
pub const PLAN_YEARS: usize = 5;

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 10.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl PlanItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_completed: false,
        }
    }
}

/// Which list of a [`YearlyPlan`] an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanSection {
    Goals,
    Milestones,
    Actions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyPlan {
    #[serde(default)]
    pub goals: Vec<PlanItem>,
    #[serde(default)]
    pub milestones: Vec<PlanItem>,
    #[serde(default)]
    pub actions: Vec<PlanItem>,
}

impl YearlyPlan {
    pub fn items(&self, section: PlanSection) -> &[PlanItem] {
        match section {
            PlanSection::Goals => &self.goals,
            PlanSection::Milestones => &self.milestones,
            PlanSection::Actions => &self.actions,
        }
    }

    pub fn items_mut(&mut self, section: PlanSection) -> &mut Vec<PlanItem> {
        match section {
            PlanSection::Goals => &mut self.goals,
            PlanSection::Milestones => &mut self.milestones,
            PlanSection::Actions => &mut self.actions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty() && self.milestones.is_empty() && self.actions.is_empty()
    }
}

/// Five self-assessment indicators, each 0–10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanScores {
    #[serde(default)]
    pub resources: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub consistency: f64,
    /// Score for how well open questions have been answered.
    #[serde(default)]
    pub questions: f64,
}

impl PlanScores {
    pub fn new(resources: f64, interest: f64, confidence: f64, consistency: f64, questions: f64) -> Self {
        let mut s = Self {
            resources,
            interest,
            confidence,
            consistency,
            questions,
        };
        s.clamp();
        s
    }

    pub fn clamp(&mut self) {
        self.resources = clamp_score(self.resources);
        self.interest = clamp_score(self.interest);
        self.confidence = clamp_score(self.confidence);
        self.consistency = clamp_score(self.consistency);
        self.questions = clamp_score(self.questions);
    }

    pub fn average(&self) -> f64 {
        (self.resources + self.interest + self.confidence + self.consistency + self.questions) / 5.0
    }
}

/// One scoring snapshot. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanHistory {
    pub id: Uuid,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    pub scores: PlanScores,
    #[serde(default)]
    pub notes: String,
}

impl PlanHistory {
    pub fn new(date: DateTime<Utc>, scores: PlanScores, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: timestamp::truncate(date),
            scores,
            notes: notes.into(),
        }
    }
}

/// Starting template for a new plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "夢想版")]
    Dream,
    #[serde(rename = "現實版")]
    Reality,
    #[serde(rename = "冒險版")]
    Adventure,
}

impl PlanType {
    pub const ALL: [PlanType; 3] = [Self::Dream, Self::Reality, Self::Adventure];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dream => "夢想版",
            Self::Reality => "現實版",
            Self::Adventure => "冒險版",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Dream => "最理想的人生藍圖",
            Self::Reality => "最務實的人生藍圖",
            Self::Adventure => "最具挑戰的人生藍圖",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OdysseyPlan {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// One slot per plan year; the array length makes resizing impossible.
    #[serde(default)]
    pub yearly_plans: [YearlyPlan; PLAN_YEARS],
    #[serde(default)]
    pub scores: PlanScores,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub history: Vec<PlanHistory>,
    #[serde(default)]
    pub current_notes: String,
}

impl OdysseyPlan {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            yearly_plans: Default::default(),
            scores: PlanScores::default(),
            questions: Vec::new(),
            challenges: Vec::new(),
            resources: Vec::new(),
            risks: Vec::new(),
            history: Vec::new(),
            current_notes: String::new(),
        }
    }

    pub fn from_template(plan_type: PlanType) -> Self {
        Self::new(plan_type.label(), plan_type.description())
    }

    pub fn year(&self, index: usize) -> Option<&YearlyPlan> {
        self.yearly_plans.get(index)
    }

    pub fn year_mut(&mut self, index: usize) -> Option<&mut YearlyPlan> {
        self.yearly_plans.get_mut(index)
    }

    /// Appends a history snapshot of `scores`/`notes`, then makes them current.
    pub fn record_score(&mut self, scores: PlanScores, notes: impl Into<String>, at: DateTime<Utc>) {
        let mut scores = scores;
        scores.clamp();
        let notes = notes.into();
        self.history.push(PlanHistory::new(at, scores, notes.clone()));
        self.scores = scores;
        self.current_notes = notes;
    }

    /// Clamps live and historical scores to 0–10 and cuts history dates to stored precision.
    pub fn clamp(&mut self) {
        self.scores.clamp();
        for entry in &mut self.history {
            entry.scores.clamp();
            entry.date = timestamp::truncate(entry.date);
        }
    }

    pub fn latest_history(&self) -> Option<&PlanHistory> {
        self.history.last()
    }

    /// Share of completed items across all years and sections, 0.0–1.0.
    pub fn completion_ratio(&self) -> f64 {
        let (done, total) = self
            .yearly_plans
            .iter()
            .flat_map(|y| y.goals.iter().chain(&y.milestones).chain(&y.actions))
            .fold((0usize, 0usize), |(d, t), item| (d + item.is_completed as usize, t + 1));
        if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        }
    }
}
