//! lifeplan-core: data layer for a personal life-planning companion.
//!
//! Holds the user profile (core values, goals, life-wheel assessment), the
//! five-year odyssey plans and the value-card catalog, persisted as JSON blobs
//! in a sled-backed settings store. Also exposes the lifespan calculator and
//! the week-grid life calendar derived from a profile.

mod calculator;
mod calendar;
pub mod codec;
mod config;
mod error;
pub mod model;
mod repository;
mod store;
mod validation;

// Lifespan arithmetic and the week grid
pub use calculator::{DailyTimeAllocation, LifeCalculator, TimeBreakdown, TimeSlice, HOURS_PER_DAY};
pub use calendar::{LifeCalendar, WeekCell, WeekState, WEEKS_PER_ROW};

// Configuration and rules
pub use config::PlannerConfig;
pub use validation::{CoreSelection, ValidationRules};

// Errors
pub use error::{PlannerError, PlannerResult, ValidationError};

// Records
pub use model::{
    default_catalog, CardCategory, CoreValue, DailyTime, Gender, Goal, LifeDomain,
    LifeWheelAssessment, LifeWheelGoal, OdysseyPlan, PlanHistory, PlanItem, PlanScores,
    PlanSection, PlanType, Profile, ValueCard, WeeklyAction, YearlyPlan, CATALOG_SIZE,
    DEFAULT_EXPECTED_LIFESPAN, DEFAULT_GOAL_HORIZON_WEEKS, MAX_SCORE, MIN_SCORE, PLAN_YEARS,
};

// Repository and storage
pub use repository::{LoadOutcome, LoadReport, PlannerRepository, RepositoryEvent};
pub use store::{
    MemorySettingsStore, SettingsStore, SledSettingsStore, PLANS_KEY, PROFILE_KEY,
    VALUE_CARDS_KEY,
};
