//! Integration test: stored record JSON.
//!
//! Verifies that every record written under the settings keys reads back equal,
//! with fully populated and with empty lists, including long multibyte text and
//! dates taken from the wall clock.

use chrono::{TimeZone, Utc};
use lifeplan_core::codec::{decode, encode};
use lifeplan_core::{
    default_catalog, CardCategory, CoreValue, DailyTime, Gender, Goal, LifeDomain,
    LifeWheelAssessment, LifeWheelGoal, OdysseyPlan, PlanHistory, PlanItem, PlanScores,
    PlanType, Profile, ValueCard, WeeklyAction, PLANS_KEY, PROFILE_KEY, VALUE_CARDS_KEY,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

fn reread<T>(key: &'static str, value: &T) -> T
where
    T: Serialize + DeserializeOwned,
{
    let bytes = encode(key, value).expect("encode");
    decode(key, &bytes).expect("decode")
}

fn assert_rereads<T>(key: &'static str, value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    assert_eq!(&reread(key, value), value);
}

fn long_text() -> String {
    "人生規劃：健康、事業與家庭的平衡 🌱 ".repeat(200)
}

fn full_profile() -> Profile {
    let now = Utc::now();
    let mut profile = Profile::new(long_text(), 34, Gender::Female)
        .with_birth_date(Utc.with_ymd_and_hms(1990, 2, 28, 23, 59, 59).unwrap())
        .with_expected_lifespan(92);
    profile.daily_necessary_time = DailyTime {
        sleep: 7.5,
        work: 9.25,
        commute: 1.5,
        meals: 1.75,
        other: 0.5,
    };
    profile.core_values = vec![
        CoreValue::new("誠信", "做自己說過的事", 1).with_reflection(long_text()),
        CoreValue::new("成長", "", 2),
    ];

    let mut goal = Goal::new("學會西班牙語", long_text(), LifeDomain::Learning, now);
    goal.set_progress(0.35);
    goal.push_weekly_action("Duolingo 每天 20 分鐘");
    let mut done = WeeklyAction::new(2, "找語言交換夥伴");
    done.is_completed = true;
    done.reflection = "第一次對話很緊張".to_string();
    goal.weekly_actions.push(done);
    profile.goals = vec![goal, Goal::new("存緊急預備金", "", LifeDomain::Finance, now)];

    let mut wheel = LifeWheelAssessment::from_scores(
        LifeDomain::ALL.iter().enumerate().map(|(i, d)| (*d, i as f64 + 0.5)),
    );
    wheel.add_goal(LifeDomain::Health, LifeWheelGoal::new("每週游泳兩次", now));
    let mut finished = LifeWheelGoal::new("戒掉宵夜", now);
    finished.is_completed = true;
    wheel.add_goal(LifeDomain::Health, finished);
    wheel.add_goal(LifeDomain::Spiritual, LifeWheelGoal::new(long_text(), now));
    profile.life_wheel_assessment = wheel;
    profile
}

fn full_plan() -> OdysseyPlan {
    let mut plan = OdysseyPlan::from_template(PlanType::Adventure);
    plan.description = long_text();
    for (year, yearly) in plan.yearly_plans.iter_mut().enumerate() {
        yearly.goals.push(PlanItem::new(format!("第 {} 年目標", year + 1)));
        yearly.milestones.push(PlanItem::new(format!("Milestone {}", year + 1)));
        let mut action = PlanItem::new(long_text());
        action.is_completed = year % 2 == 0;
        yearly.actions.push(action);
    }
    plan.questions = vec!["要辭職嗎？".to_string(), String::new()];
    plan.challenges = vec!["簽證".to_string()];
    plan.resources = vec!["存款".to_string(), "朋友的民宿".to_string()];
    plan.risks = vec![long_text()];
    plan.record_score(PlanScores::new(3.0, 9.5, 4.25, 5.0, 2.0), "第一次評分", Utc::now());
    plan.record_score(PlanScores::new(6.0, 9.0, 6.5, 7.0, 5.5), long_text(), Utc::now());
    plan
}

#[test]
fn populated_profile_rereads_equal() {
    assert_rereads(PROFILE_KEY, &full_profile());
}

#[test]
fn empty_profile_rereads_equal() {
    let profile = Profile::new("", 0, Gender::Other);
    let back = reread(PROFILE_KEY, &profile);
    assert_eq!(back, profile);
    assert!(back.core_values.is_empty());
    assert!(back.goals.is_empty());
    assert!(back.life_wheel_assessment.goals.is_empty());
    assert!(back.birth_date.is_none());
}

#[test]
fn populated_plans_reread_equal() {
    let plans = vec![full_plan(), OdysseyPlan::from_template(PlanType::Reality)];
    let back = reread(PLANS_KEY, &plans);
    assert_eq!(back, plans);
    assert_eq!(back[0].history.len(), 2);
    assert!(back[0].yearly_plans.iter().all(|y| y.goals.len() == 1));
    assert!(back[1].yearly_plans.iter().all(|y| y.is_empty()));
}

#[test]
fn empty_plan_list_rereads_equal() {
    assert_rereads::<Vec<OdysseyPlan>>(PLANS_KEY, &Vec::new());
}

#[test]
fn value_cards_in_every_category_reread_equal() {
    let mut cards = default_catalog();
    for (card, category) in cards.iter_mut().zip(CardCategory::ALL.iter().cycle()) {
        card.category = *category;
    }
    cards.push(ValueCard {
        id: uuid::Uuid::new_v4(),
        name: long_text(),
        description: String::new(),
        category: CardCategory::Core,
    });
    assert_rereads(VALUE_CARDS_KEY, &cards);
}

#[test]
fn single_records_reread_equal() {
    assert_rereads("coreValue", &CoreValue::new("自由", long_text(), -3));
    assert_rereads(
        "planHistory",
        &PlanHistory::new(Utc::now(), PlanScores::new(10.0, 0.0, 7.5, 2.5, 1.0), long_text()),
    );
    assert_rereads("lifeWheelGoal", &LifeWheelGoal::new("冥想十分鐘", Utc::now()));
}
