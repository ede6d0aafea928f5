//! Planner repository: the canonical in-memory profile, odyssey plans and value
//! cards, written back to the settings store after every mutation.
//!
//! Each mutation re-encodes the whole affected collection and writes it under
//! its key before returning, then broadcasts a [`RepositoryEvent`]. Updates and
//! deletes that reference an unknown id return [`PlannerError::NotFound`] and
//! leave the store untouched. Edits are applied to a copy that replaces the
//! in-memory state only once the write succeeds.

use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::calculator::LifeCalculator;
use crate::codec;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::model::timestamp;
use crate::model::{
    default_catalog, CardCategory, CoreValue, DailyTime, Goal, LifeDomain, LifeWheelAssessment,
    LifeWheelGoal, OdysseyPlan, PlanItem, PlanScores, PlanSection, Profile, ValueCard, YearlyPlan,
    PLAN_YEARS,
};
use crate::store::{SettingsStore, SledSettingsStore, PLANS_KEY, PROFILE_KEY, VALUE_CARDS_KEY};
use crate::validation::{CoreSelection, ValidationRules};

/// Change notification; subscribers re-read the matching collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryEvent {
    ProfileChanged,
    PlansChanged,
    ValueCardsChanged,
}

/// What happened to one stored collection at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Nothing stored under the key.
    Absent,
    /// Nothing stored; defaults were written.
    Seeded,
    /// Stored bytes did not decode; the collection starts empty (or seeded, for value cards).
    DecodeFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub profile: LoadOutcome,
    pub plans: LoadOutcome,
    pub value_cards: LoadOutcome,
}

impl LoadReport {
    pub fn has_decode_failures(&self) -> bool {
        [&self.profile, &self.plans, &self.value_cards]
            .iter()
            .any(|o| matches!(o, LoadOutcome::DecodeFailed(_)))
    }
}

trait Identified {
    fn ident(&self) -> Uuid;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn ident(&self) -> Uuid {
                self.id
            }
        })*
    };
}

identified!(CoreValue, Goal, OdysseyPlan, PlanItem);

/// Replaces the element with the same id in place. Returns false if absent.
fn replace_by_id<T: Identified>(list: &mut [T], item: T) -> bool {
    match list.iter_mut().find(|x| x.ident() == item.ident()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Removes every element with `id`, keeping the order of the rest. Returns false if none matched.
fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: Uuid) -> bool {
    let before = list.len();
    list.retain(|x| x.ident() != id);
    list.len() != before
}

fn find_plan(plans: &mut [OdysseyPlan], id: Uuid) -> PlannerResult<&mut OdysseyPlan> {
    plans
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| PlannerError::not_found("odyssey plan", id))
}

fn find_year(plans: &mut [OdysseyPlan], plan_id: Uuid, year: usize) -> PlannerResult<&mut YearlyPlan> {
    find_plan(plans, plan_id)?
        .year_mut(year)
        .ok_or(PlannerError::YearOutOfRange(year))
}

enum Decoded<T> {
    Value(T),
    Absent,
    Failed(String),
}

fn read_blob<S, T>(store: &S, key: &'static str) -> PlannerResult<Decoded<T>>
where
    S: SettingsStore,
    T: serde::de::DeserializeOwned,
{
    let Some(bytes) = store.get(key)? else {
        return Ok(Decoded::Absent);
    };
    match codec::decode(key, &bytes) {
        Ok(v) => Ok(Decoded::Value(v)),
        Err(e) => {
            tracing::warn!(
                target: "lifeplan::repository",
                key = key,
                bytes = bytes.len(),
                error = %e,
                "stored blob failed to decode; starting from defaults"
            );
            Ok(Decoded::Failed(e.to_string()))
        }
    }
}

pub struct PlannerRepository<S: SettingsStore> {
    store: S,
    rules: ValidationRules,
    profile: Option<Profile>,
    plans: Vec<OdysseyPlan>,
    value_cards: Vec<ValueCard>,
    events: broadcast::Sender<RepositoryEvent>,
    load_report: LoadReport,
    clock: fn() -> DateTime<Utc>,
}

impl PlannerRepository<SledSettingsStore> {
    /// Opens the sled store at `config.storage_path` and loads it.
    pub fn open_config(config: &PlannerConfig) -> PlannerResult<Self> {
        Self::open_sled(&config.storage_path, config)
    }

    pub fn open_sled<P: AsRef<Path>>(path: P, config: &PlannerConfig) -> PlannerResult<Self> {
        let store = SledSettingsStore::open_path(path)?;
        Self::open(store, config)
    }

    /// Flushes pending sled writes to disk.
    pub fn flush(&self) -> PlannerResult<()> {
        self.store.flush()?;
        Ok(())
    }
}

impl<S: SettingsStore> PlannerRepository<S> {
    /// Loads all three collections from `store`, seeding the value-card catalog on first run.
    pub fn open(store: S, config: &PlannerConfig) -> PlannerResult<Self> {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let mut repo = Self {
            store,
            rules: config.validation.clone(),
            profile: None,
            plans: Vec::new(),
            value_cards: Vec::new(),
            events,
            load_report: LoadReport {
                profile: LoadOutcome::Absent,
                plans: LoadOutcome::Absent,
                value_cards: LoadOutcome::Absent,
            },
            clock: Utc::now,
        };
        repo.load()?;
        Ok(repo)
    }

    /// Opens with default configuration.
    pub fn with_defaults(store: S) -> PlannerResult<Self> {
        Self::open(store, &PlannerConfig::default())
    }

    fn load(&mut self) -> PlannerResult<()> {
        self.load_report.profile = match read_blob::<_, Profile>(&self.store, PROFILE_KEY)? {
            Decoded::Value(mut p) => {
                p.clamp();
                self.profile = Some(p);
                LoadOutcome::Loaded
            }
            Decoded::Absent => LoadOutcome::Absent,
            Decoded::Failed(e) => LoadOutcome::DecodeFailed(e),
        };

        self.load_report.plans = match read_blob::<_, Vec<OdysseyPlan>>(&self.store, PLANS_KEY)? {
            Decoded::Value(mut plans) => {
                plans.iter_mut().for_each(OdysseyPlan::clamp);
                self.plans = plans;
                LoadOutcome::Loaded
            }
            Decoded::Absent => LoadOutcome::Absent,
            Decoded::Failed(e) => LoadOutcome::DecodeFailed(e),
        };

        self.load_report.value_cards =
            match read_blob::<_, Vec<ValueCard>>(&self.store, VALUE_CARDS_KEY)? {
                Decoded::Value(cards) => {
                    self.value_cards = cards;
                    LoadOutcome::Loaded
                }
                Decoded::Absent => {
                    self.seed_value_cards()?;
                    LoadOutcome::Seeded
                }
                Decoded::Failed(e) => {
                    self.seed_value_cards()?;
                    LoadOutcome::DecodeFailed(e)
                }
            };

        tracing::info!(
            target: "lifeplan::repository",
            has_profile = self.profile.is_some(),
            plans = self.plans.len(),
            value_cards = self.value_cards.len(),
            "planner state loaded"
        );
        Ok(())
    }

    fn seed_value_cards(&mut self) -> PlannerResult<()> {
        let catalog = default_catalog();
        tracing::info!(
            target: "lifeplan::repository",
            cards = catalog.len(),
            "seeding default value-card catalog"
        );
        self.write(VALUE_CARDS_KEY, &catalog)?;
        self.value_cards = catalog;
        Ok(())
    }

    /// Outcome of the initial load for each collection.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the time source used for history and goal timestamps.
    pub fn set_clock(&mut self, clock: fn() -> DateTime<Utc>) {
        self.clock = clock;
    }

    /// Current time at stored precision.
    fn now(&self) -> DateTime<Utc> {
        timestamp::truncate((self.clock)())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RepositoryEvent> {
        self.events.subscribe()
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &'static str, value: &T) -> PlannerResult<()> {
        let bytes = codec::encode(key, value)?;
        self.store.set(key, &bytes)?;
        Ok(())
    }

    fn emit(&self, event: RepositoryEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Runs `edit` on a copy of the profile and swaps the copy in only after it is stored.
    fn commit_profile<R>(
        &mut self,
        edit: impl FnOnce(&mut Profile) -> PlannerResult<R>,
    ) -> PlannerResult<R> {
        let mut draft = self.profile.clone().ok_or(PlannerError::NoProfile)?;
        let out = edit(&mut draft)?;
        self.write(PROFILE_KEY, &draft)?;
        self.profile = Some(draft);
        self.emit(RepositoryEvent::ProfileChanged);
        Ok(out)
    }

    fn commit_plans<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<OdysseyPlan>) -> PlannerResult<R>,
    ) -> PlannerResult<R> {
        let mut draft = self.plans.clone();
        let out = edit(&mut draft)?;
        self.write(PLANS_KEY, &draft)?;
        self.plans = draft;
        self.emit(RepositoryEvent::PlansChanged);
        Ok(out)
    }

    fn commit_value_cards<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<ValueCard>) -> PlannerResult<R>,
    ) -> PlannerResult<R> {
        let mut draft = self.value_cards.clone();
        let out = edit(&mut draft)?;
        self.write(VALUE_CARDS_KEY, &draft)?;
        self.value_cards = draft;
        self.emit(RepositoryEvent::ValueCardsChanged);
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // Profile
    // ---------------------------------------------------------------------

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Stores `profile` as the single user profile, creating it on first call.
    pub fn save_profile(&mut self, mut profile: Profile) -> PlannerResult<()> {
        profile.clamp();
        self.write(PROFILE_KEY, &profile)?;
        if self.profile.is_none() {
            tracing::info!(target: "lifeplan::repository", profile_id = %profile.id, "profile created");
        }
        self.profile = Some(profile);
        self.emit(RepositoryEvent::ProfileChanged);
        Ok(())
    }

    /// Replaces an existing profile. Fails with [`PlannerError::NoProfile`] before the first save.
    pub fn update_profile(&mut self, profile: Profile) -> PlannerResult<()> {
        if self.profile.is_none() {
            return Err(PlannerError::NoProfile);
        }
        self.save_profile(profile)
    }

    pub fn update_daily_time(&mut self, daily_time: DailyTime) -> PlannerResult<()> {
        self.commit_profile(|p| {
            p.daily_necessary_time = daily_time;
            Ok(())
        })
    }

    pub fn update_life_expectancy(&mut self, years: i32) -> PlannerResult<()> {
        self.commit_profile(|p| {
            p.expected_lifespan = years;
            Ok(())
        })
    }

    /// Calculator for the saved profile at the repository clock's current time.
    pub fn calculator_for_profile(&self) -> Option<LifeCalculator> {
        self.profile.as_ref()?.calculator(self.now())
    }

    // ---------------------------------------------------------------------
    // Core values
    // ---------------------------------------------------------------------

    pub fn add_core_value(&mut self, value: CoreValue) -> PlannerResult<()> {
        self.commit_profile(|p| {
            p.core_values.push(value);
            Ok(())
        })
    }

    pub fn update_core_value(&mut self, value: CoreValue) -> PlannerResult<()> {
        self.commit_profile(|p| {
            let id = value.id;
            if !replace_by_id(&mut p.core_values, value) {
                return Err(PlannerError::not_found("core value", id));
            }
            Ok(())
        })
    }

    pub fn delete_core_value(&mut self, id: Uuid) -> PlannerResult<()> {
        self.commit_profile(|p| {
            if !remove_by_id(&mut p.core_values, id) {
                return Err(PlannerError::not_found("core value", id));
            }
            Ok(())
        })
    }

    /// Adds a core value named after a value card. Returns the new core value's id.
    pub fn add_core_value_from_card(&mut self, card_id: Uuid, priority: i32) -> PlannerResult<Uuid> {
        let card = self
            .value_cards
            .iter()
            .find(|c| c.id == card_id)
            .ok_or_else(|| PlannerError::not_found("value card", card_id))?;
        let value = CoreValue::from_card(card, priority);
        let id = value.id;
        self.add_core_value(value)?;
        Ok(id)
    }

    // ---------------------------------------------------------------------
    // Goals
    // ---------------------------------------------------------------------

    pub fn add_goal(&mut self, mut goal: Goal) -> PlannerResult<()> {
        goal.clamp();
        self.commit_profile(|p| {
            p.goals.push(goal);
            Ok(())
        })
    }

    pub fn update_goal(&mut self, mut goal: Goal) -> PlannerResult<()> {
        goal.clamp();
        self.commit_profile(|p| {
            let id = goal.id;
            if !replace_by_id(&mut p.goals, goal) {
                return Err(PlannerError::not_found("goal", id));
            }
            Ok(())
        })
    }

    pub fn delete_goal(&mut self, id: Uuid) -> PlannerResult<()> {
        self.commit_profile(|p| {
            if !remove_by_id(&mut p.goals, id) {
                return Err(PlannerError::not_found("goal", id));
            }
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Life wheel
    // ---------------------------------------------------------------------

    pub fn update_life_wheel_assessment(
        &mut self,
        mut assessment: LifeWheelAssessment,
    ) -> PlannerResult<()> {
        assessment.clamp();
        self.commit_profile(|p| {
            p.life_wheel_assessment = assessment;
            Ok(())
        })
    }

    /// Sets one domain score (clamped to 0–10), keeping goals and other scores.
    pub fn set_life_wheel_score(&mut self, domain: LifeDomain, score: f64) -> PlannerResult<()> {
        self.commit_profile(|p| {
            p.life_wheel_assessment.set_score(domain, score);
            Ok(())
        })
    }

    /// Adds a goal to `domain` after checking length and per-domain capacity.
    pub fn add_life_wheel_goal(
        &mut self,
        domain: LifeDomain,
        content: &str,
    ) -> PlannerResult<Uuid> {
        self.rules.check_goal_content(content)?;
        let goal = LifeWheelGoal::new(content.trim(), self.now());
        let rules = self.rules.clone();
        self.commit_profile(|p| {
            let wheel = &mut p.life_wheel_assessment;
            rules.check_goal_capacity(domain, wheel.goals_for(domain).len())?;
            let id = goal.id;
            wheel.add_goal(domain, goal);
            Ok(id)
        })
    }

    /// Replaces a life-wheel goal; its text is trimmed and checked like a new goal.
    pub fn update_life_wheel_goal(
        &mut self,
        domain: LifeDomain,
        mut goal: LifeWheelGoal,
    ) -> PlannerResult<()> {
        self.rules.check_goal_content(&goal.content)?;
        goal.content = goal.content.trim().to_string();
        goal.created_at = timestamp::truncate(goal.created_at);
        self.commit_profile(|p| {
            let id = goal.id;
            if !p.life_wheel_assessment.update_goal(domain, goal) {
                return Err(PlannerError::not_found("life wheel goal", id));
            }
            Ok(())
        })
    }

    /// Flips completion of a life-wheel goal. Returns the new state.
    pub fn toggle_life_wheel_goal(&mut self, domain: LifeDomain, id: Uuid) -> PlannerResult<bool> {
        self.commit_profile(|p| {
            let goal = p
                .life_wheel_assessment
                .goals
                .get_mut(&domain)
                .and_then(|list| list.iter_mut().find(|g| g.id == id))
                .ok_or_else(|| PlannerError::not_found("life wheel goal", id))?;
            goal.is_completed = !goal.is_completed;
            Ok(goal.is_completed)
        })
    }

    pub fn delete_life_wheel_goal(&mut self, domain: LifeDomain, id: Uuid) -> PlannerResult<()> {
        self.commit_profile(|p| {
            if !p.life_wheel_assessment.remove_goal(domain, id) {
                return Err(PlannerError::not_found("life wheel goal", id));
            }
            Ok(())
        })
    }

    // ---------------------------------------------------------------------
    // Odyssey plans
    // ---------------------------------------------------------------------

    pub fn odyssey_plans(&self) -> &[OdysseyPlan] {
        &self.plans
    }

    pub fn odyssey_plan(&self, id: Uuid) -> Option<&OdysseyPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn add_odyssey_plan(&mut self, mut plan: OdysseyPlan) -> PlannerResult<()> {
        plan.clamp();
        let (plan_id, title) = (plan.id, plan.title.clone());
        self.commit_plans(|plans| {
            plans.push(plan);
            Ok(())
        })?;
        tracing::info!(
            target: "lifeplan::repository",
            plan_id = %plan_id,
            title = %title,
            "odyssey plan added"
        );
        Ok(())
    }

    /// Replaces title, description and the five yearly plans; scores and history are kept.
    pub fn update_odyssey_plan(
        &mut self,
        id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        yearly_plans: [YearlyPlan; PLAN_YEARS],
    ) -> PlannerResult<()> {
        let (title, description) = (title.into(), description.into());
        self.commit_plans(|plans| {
            let plan = find_plan(plans, id)?;
            plan.title = title;
            plan.description = description;
            plan.yearly_plans = yearly_plans;
            tracing::debug!(
                target: "lifeplan::repository",
                plan_id = %id,
                goals = plan.yearly_plans.iter().map(|y| y.goals.len()).sum::<usize>(),
                milestones = plan.yearly_plans.iter().map(|y| y.milestones.len()).sum::<usize>(),
                actions = plan.yearly_plans.iter().map(|y| y.actions.len()).sum::<usize>(),
                "odyssey plan updated"
            );
            Ok(())
        })
    }

    pub fn delete_odyssey_plan(&mut self, id: Uuid) -> PlannerResult<()> {
        self.commit_plans(|plans| {
            if !remove_by_id(plans, id) {
                return Err(PlannerError::not_found("odyssey plan", id));
            }
            Ok(())
        })
    }

    /// Appends a history snapshot of `scores`/`notes`, then makes them the live values.
    pub fn update_plan_score(
        &mut self,
        plan_id: Uuid,
        scores: PlanScores,
        notes: impl Into<String>,
    ) -> PlannerResult<()> {
        let (now, notes) = (self.now(), notes.into());
        self.commit_plans(|plans| {
            find_plan(plans, plan_id)?.record_score(scores, notes, now);
            Ok(())
        })
    }

    /// As [`Self::update_plan_score`], also replacing the open-question list.
    pub fn update_plan_score_and_questions(
        &mut self,
        plan_id: Uuid,
        scores: PlanScores,
        notes: impl Into<String>,
        questions: Vec<String>,
    ) -> PlannerResult<()> {
        let (now, notes) = (self.now(), notes.into());
        self.commit_plans(|plans| {
            let plan = find_plan(plans, plan_id)?;
            plan.record_score(scores, notes, now);
            plan.questions = questions;
            Ok(())
        })
    }

    /// Appends an item to one section of year `year` (0-based). Returns the item id.
    pub fn add_plan_item(
        &mut self,
        plan_id: Uuid,
        year: usize,
        section: PlanSection,
        content: impl Into<String>,
    ) -> PlannerResult<Uuid> {
        let item = PlanItem::new(content);
        self.commit_plans(|plans| {
            let id = item.id;
            find_year(plans, plan_id, year)?.items_mut(section).push(item);
            Ok(id)
        })
    }

    pub fn set_plan_item_completed(
        &mut self,
        plan_id: Uuid,
        year: usize,
        section: PlanSection,
        item_id: Uuid,
        completed: bool,
    ) -> PlannerResult<()> {
        self.commit_plans(|plans| {
            let item = find_year(plans, plan_id, year)?
                .items_mut(section)
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| PlannerError::not_found("plan item", item_id))?;
            item.is_completed = completed;
            Ok(())
        })
    }

    pub fn remove_plan_item(
        &mut self,
        plan_id: Uuid,
        year: usize,
        section: PlanSection,
        item_id: Uuid,
    ) -> PlannerResult<()> {
        self.commit_plans(|plans| {
            if !remove_by_id(find_year(plans, plan_id, year)?.items_mut(section), item_id) {
                return Err(PlannerError::not_found("plan item", item_id));
            }
            Ok(())
        })
    }

    /// Re-reads plans from the store. On a decode failure the in-memory list is kept
    /// and the error is returned.
    pub fn reload_odyssey_plans(&mut self) -> PlannerResult<()> {
        if let Some(bytes) = self.store.get(PLANS_KEY)? {
            let mut plans: Vec<OdysseyPlan> = codec::decode(PLANS_KEY, &bytes)?;
            plans.iter_mut().for_each(OdysseyPlan::clamp);
            self.plans = plans;
            self.emit(RepositoryEvent::PlansChanged);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Value cards
    // ---------------------------------------------------------------------

    pub fn value_cards(&self) -> &[ValueCard] {
        &self.value_cards
    }

    pub fn update_card_category(&mut self, card_id: Uuid, category: CardCategory) -> PlannerResult<()> {
        self.commit_value_cards(|cards| {
            let card = cards
                .iter_mut()
                .find(|c| c.id == card_id)
                .ok_or_else(|| PlannerError::not_found("value card", card_id))?;
            card.category = category;
            Ok(())
        })
    }

    /// Restores the default catalog with every card unassigned.
    pub fn reset_value_cards(&mut self) -> PlannerResult<()> {
        self.commit_value_cards(|cards| {
            *cards = default_catalog();
            Ok(())
        })
    }

    pub fn cards_in(&self, category: CardCategory) -> impl Iterator<Item = &ValueCard> + '_ {
        self.value_cards.iter().filter(move |c| c.category == category)
    }

    pub fn core_value_cards(&self) -> Vec<&ValueCard> {
        self.cards_in(CardCategory::Core).collect()
    }

    /// Card count per category, in [`CardCategory::ALL`] order.
    pub fn category_counts(&self) -> [(CardCategory, usize); 5] {
        CardCategory::ALL.map(|cat| (cat, self.cards_in(cat).count()))
    }

    /// Where the core-card count sits against the configured recommendation.
    pub fn core_selection(&self) -> CoreSelection {
        self.rules.core_selection(self.cards_in(CardCategory::Core).count())
    }
}
