//! The user profile and the records it owns: core values, goals and weekly actions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::LifeDomain;
use super::life_wheel::LifeWheelAssessment;
use super::timestamp;
use super::value_card::ValueCard;
use crate::calculator::{DailyTimeAllocation, LifeCalculator};

/// Default lifespan used for new profiles, in years.
pub const DEFAULT_EXPECTED_LIFESPAN: i32 = 80;

/// New goals are due this many weeks after creation unless a date is given.
pub const DEFAULT_GOAL_HORIZON_WEEKS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "男")]
    Male,
    #[serde(rename = "女")]
    Female,
    #[serde(rename = "其他")]
    Other,
}

/// Hours per day spent on necessary activities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTime {
    pub sleep: f64,
    pub work: f64,
    pub commute: f64,
    pub meals: f64,
    pub other: f64,
}

impl Default for DailyTime {
    fn default() -> Self {
        Self {
            sleep: 8.0,
            work: 8.0,
            commute: 1.0,
            meals: 2.0,
            other: 1.0,
        }
    }
}

impl DailyTime {
    pub fn total(&self) -> f64 {
        self.sleep + self.work + self.commute + self.meals + self.other
    }

    /// The three activities that count against disposable time.
    pub fn allocation(&self) -> DailyTimeAllocation {
        DailyTimeAllocation {
            sleep: self.sleep,
            commute: self.commute,
            work: self.work,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub reflection: String,
}

impl CoreValue {
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            priority,
            reflection: String::new(),
        }
    }

    /// Core value carrying a sorted card's name and description. Gets its own id.
    pub fn from_card(card: &ValueCard, priority: i32) -> Self {
        Self::new(card.name.clone(), card.description.clone(), priority)
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = reflection.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAction {
    pub id: Uuid,
    pub week_number: i32,
    pub action: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub reflection: String,
}

impl WeeklyAction {
    pub fn new(week_number: i32, action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            week_number,
            action: action.into(),
            is_completed: false,
            reflection: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub target_date: DateTime<Utc>,
    pub category: LifeDomain,
    /// Fraction complete, 0.0–1.0.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub weekly_actions: Vec<WeeklyAction>,
}

impl Goal {
    /// New goal due [`DEFAULT_GOAL_HORIZON_WEEKS`] after `now`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: LifeDomain,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            target_date: timestamp::truncate(now + Duration::weeks(DEFAULT_GOAL_HORIZON_WEEKS)),
            category,
            progress: 0.0,
            weekly_actions: Vec::new(),
        }
    }

    pub fn with_target_date(mut self, target_date: DateTime<Utc>) -> Self {
        self.target_date = timestamp::truncate(target_date);
        self
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    }

    pub fn clamp(&mut self) {
        let p = self.progress;
        self.set_progress(p);
        self.target_date = timestamp::truncate(self.target_date);
    }

    /// Appends an action numbered after the existing ones. Returns its id.
    pub fn push_weekly_action(&mut self, action: impl Into<String>) -> Uuid {
        let week = self.weekly_actions.len() as i32 + 1;
        let item = WeeklyAction::new(week, action);
        let id = item.id;
        self.weekly_actions.push(item);
        id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub expected_lifespan: i32,
    #[serde(default)]
    pub daily_necessary_time: DailyTime,
    #[serde(default)]
    pub core_values: Vec<CoreValue>,
    #[serde(default)]
    pub life_wheel_assessment: LifeWheelAssessment,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub birth_date: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(name: impl Into<String>, age: i32, gender: Gender) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            gender,
            expected_lifespan: DEFAULT_EXPECTED_LIFESPAN,
            daily_necessary_time: DailyTime::default(),
            core_values: Vec::new(),
            life_wheel_assessment: LifeWheelAssessment::default(),
            goals: Vec::new(),
            birth_date: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: DateTime<Utc>) -> Self {
        self.birth_date = Some(timestamp::truncate(birth_date));
        self
    }

    pub fn with_expected_lifespan(mut self, years: i32) -> Self {
        self.expected_lifespan = years;
        self
    }

    /// Applies every range invariant held by owned records.
    pub fn clamp(&mut self) {
        self.life_wheel_assessment.clamp();
        for goal in &mut self.goals {
            goal.clamp();
        }
        self.birth_date = self.birth_date.map(timestamp::truncate);
    }

    /// Calculator for this profile at `now`; `None` until a birth date is recorded.
    pub fn calculator(&self, now: DateTime<Utc>) -> Option<LifeCalculator> {
        let birth = self.birth_date?;
        Some(LifeCalculator::new(
            birth,
            now,
            self.expected_lifespan,
            self.daily_necessary_time.allocation(),
        ))
    }
}
