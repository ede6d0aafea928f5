//! Planner records. Every type is a plain serde value; list order is display order.

mod domain;
mod life_wheel;
mod odyssey;
mod profile;
pub mod timestamp;
mod value_card;

pub use domain::LifeDomain;
pub use life_wheel::{LifeWheelAssessment, LifeWheelGoal, MAX_SCORE, MIN_SCORE};
pub use odyssey::{
    OdysseyPlan, PlanHistory, PlanItem, PlanScores, PlanSection, PlanType, YearlyPlan, PLAN_YEARS,
};
pub use profile::{
    CoreValue, DailyTime, Gender, Goal, Profile, WeeklyAction, DEFAULT_EXPECTED_LIFESPAN,
    DEFAULT_GOAL_HORIZON_WEEKS,
};
pub use value_card::{default_catalog, CardCategory, ValueCard, CATALOG_SIZE};
