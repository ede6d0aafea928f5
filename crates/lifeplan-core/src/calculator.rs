//! Lifespan arithmetic: elapsed and remaining time, disposable hours, week counts.
//!
//! All figures are display approximations. Months are 30 days and years are
//! 365 days in [`TimeBreakdown`], while progress uses 365.25-day years. A
//! non-positive `expected_lifespan` produces zeros instead of an error.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::calendar::LifeCalendar;

pub const HOURS_PER_DAY: f64 = 24.0;
const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_WEEK: f64 = 7.0 * SECS_PER_DAY;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_YEAR_EXACT: f64 = 365.25;

/// Hours per day spent sleeping, commuting and working.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTimeAllocation {
    pub sleep: f64,
    pub commute: f64,
    pub work: f64,
}

impl Default for DailyTimeAllocation {
    fn default() -> Self {
        Self {
            sleep: 8.0,
            commute: 1.0,
            work: 8.0,
        }
    }
}

impl DailyTimeAllocation {
    /// Hours left after sleep, commute and work.
    pub fn disposable_time(&self) -> f64 {
        HOURS_PER_DAY - (self.sleep + self.commute + self.work)
    }
}

/// Slice of the day in [`LifeCalculator::daily_time_distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlice {
    Sleep,
    Commute,
    Work,
    Free,
}

impl TimeSlice {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sleep => "睡眠",
            Self::Commute => "通勤",
            Self::Work => "工作",
            Self::Free => "自由時間",
        }
    }
}

/// A duration split with fixed divisors (60 / 60 / 24, 30-day months, 365-day years).
/// Months wrap at 12 but years are counted independently from total days,
/// so the fields do not sum back to the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl TimeBreakdown {
    /// Negative or non-finite input yields all zeros.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::default();
        }
        let total_minutes = (seconds / 60.0) as i64;
        let total_hours = total_minutes / 60;
        let total_days = total_hours / 24;
        Self {
            years: total_days / DAYS_PER_YEAR,
            months: (total_days / 30) % 12,
            days: total_days % 30,
            hours: total_hours % 24,
            minutes: total_minutes % 60,
        }
    }
}

impl std::fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}y {}m {}d {}h {}min",
            self.years, self.months, self.days, self.hours, self.minutes
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeCalculator {
    pub birth_date: DateTime<Utc>,
    pub current_date: DateTime<Utc>,
    /// Expected lifespan in years.
    pub expected_lifespan: i32,
    pub daily_time: DailyTimeAllocation,
}

impl LifeCalculator {
    pub fn new(
        birth_date: DateTime<Utc>,
        current_date: DateTime<Utc>,
        expected_lifespan: i32,
        daily_time: DailyTimeAllocation,
    ) -> Self {
        Self {
            birth_date,
            current_date,
            expected_lifespan,
            daily_time,
        }
    }

    fn has_lifespan(&self) -> bool {
        self.expected_lifespan > 0
    }

    /// Seconds from birth to the current date; negative if birth is in the future.
    pub fn elapsed_seconds(&self) -> f64 {
        (self.current_date - self.birth_date).num_milliseconds() as f64 / 1000.0
    }

    pub fn disposable_time(&self) -> f64 {
        self.daily_time.disposable_time()
    }

    pub fn lived_time(&self) -> TimeBreakdown {
        TimeBreakdown::from_seconds(self.elapsed_seconds())
    }

    /// Time until January 1st of (birth year + expected lifespan), floored at zero.
    pub fn remaining_time(&self) -> TimeBreakdown {
        let Some(end) = self.expected_end() else {
            return TimeBreakdown::default();
        };
        let secs = (end - self.current_date).num_milliseconds() as f64 / 1000.0;
        TimeBreakdown::from_seconds(secs.max(0.0))
    }

    /// Projected end of life used by [`Self::remaining_time`].
    pub fn expected_end(&self) -> Option<DateTime<Utc>> {
        if !self.has_lifespan() {
            return None;
        }
        let year = self.birth_date.year().checked_add(self.expected_lifespan)?;
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
    }

    /// Percent of the expected lifespan (365.25-day years) already lived.
    /// Exceeds 100 once the current date passes the projection.
    pub fn progress_percentage(&self) -> f64 {
        if !self.has_lifespan() {
            return 0.0;
        }
        let total = self.expected_lifespan as f64 * DAYS_PER_YEAR_EXACT * SECS_PER_DAY;
        self.elapsed_seconds() / total * 100.0
    }

    /// Disposable hours over the remaining days (365-day years), floored at zero.
    pub fn remaining_disposable_time(&self) -> f64 {
        if !self.has_lifespan() {
            return 0.0;
        }
        let total_days = (self.expected_lifespan as i64 * DAYS_PER_YEAR) as f64;
        let remaining_days = total_days - self.elapsed_seconds() / SECS_PER_DAY;
        (remaining_days * self.disposable_time()).max(0.0)
    }

    pub fn total_weeks(&self) -> usize {
        if !self.has_lifespan() {
            return 0;
        }
        (self.expected_lifespan as i64 * DAYS_PER_YEAR / 7) as usize
    }

    pub fn lived_weeks(&self) -> usize {
        let elapsed = self.elapsed_seconds();
        if elapsed <= 0.0 {
            return 0;
        }
        (elapsed / SECS_PER_WEEK) as usize
    }

    pub fn remaining_weeks(&self) -> usize {
        self.total_weeks().saturating_sub(self.lived_weeks())
    }

    /// Hours per day by slice, in display order.
    pub fn daily_time_distribution(&self) -> [(TimeSlice, f64); 4] {
        [
            (TimeSlice::Sleep, self.daily_time.sleep),
            (TimeSlice::Commute, self.daily_time.commute),
            (TimeSlice::Work, self.daily_time.work),
            (TimeSlice::Free, self.disposable_time()),
        ]
    }

    pub fn calendar(&self) -> LifeCalendar {
        LifeCalendar::new(self.total_weeks(), self.lived_weeks(), self.disposable_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn calc(birth: DateTime<Utc>, now: DateTime<Utc>, lifespan: i32) -> LifeCalculator {
        LifeCalculator::new(birth, now, lifespan, DailyTimeAllocation::default())
    }

    #[test]
    fn disposable_time_subtracts_sleep_commute_work() {
        let alloc = DailyTimeAllocation {
            sleep: 7.5,
            commute: 1.5,
            work: 9.0,
        };
        assert_eq!(alloc.disposable_time(), 6.0);
    }

    #[test]
    fn breakdown_uses_fixed_divisors() {
        // 400 days, 5 hours, 7 minutes.
        let secs = 400.0 * 86_400.0 + 5.0 * 3600.0 + 7.0 * 60.0 + 30.0;
        let b = TimeBreakdown::from_seconds(secs);
        assert_eq!(
            b,
            TimeBreakdown {
                years: 1,
                months: 1,
                days: 10,
                hours: 5,
                minutes: 7
            }
        );
        assert_eq!(TimeBreakdown::from_seconds(-5.0), TimeBreakdown::default());
    }

    #[test]
    fn progress_is_zero_at_birth_and_hundred_at_lifespan() {
        let birth = date(1990, 6, 15);
        assert_eq!(calc(birth, birth, 80).progress_percentage(), 0.0);

        let end = birth + Duration::milliseconds((80.0 * 365.25 * 86_400_000.0) as i64);
        let p = calc(birth, end, 80).progress_percentage();
        assert!((p - 100.0).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn progress_exceeds_hundred_past_lifespan() {
        let c = calc(date(1900, 1, 1), date(2000, 1, 1), 80);
        assert!(c.progress_percentage() > 100.0);
        assert_eq!(c.remaining_time(), TimeBreakdown::default());
        assert_eq!(c.remaining_disposable_time(), 0.0);
        assert_eq!(c.remaining_weeks(), 0);
    }

    #[test]
    fn weeks_add_up() {
        let c = calc(date(1995, 3, 10), date(2024, 8, 20), 85);
        assert_eq!(c.total_weeks(), 85 * 365 / 7);
        assert_eq!(c.lived_weeks() + c.remaining_weeks(), c.total_weeks());
    }

    #[test]
    fn non_positive_lifespan_yields_zeros() {
        let c = calc(date(1990, 1, 1), date(2020, 1, 1), 0);
        assert_eq!(c.progress_percentage(), 0.0);
        assert_eq!(c.total_weeks(), 0);
        assert_eq!(c.remaining_weeks(), 0);
        assert_eq!(c.remaining_time(), TimeBreakdown::default());
        assert_eq!(c.remaining_disposable_time(), 0.0);
        assert!(c.expected_end().is_none());

        let negative = calc(date(1990, 1, 1), date(2020, 1, 1), -5);
        assert_eq!(negative.total_weeks(), 0);
    }

    #[test]
    fn remaining_time_runs_to_new_year_of_final_year() {
        let c = calc(date(1990, 7, 1), date(2069, 12, 31), 80);
        assert_eq!(c.expected_end(), Some(date(2070, 1, 1)));
        assert_eq!(c.remaining_time().days, 1);
    }

    #[test]
    fn remaining_disposable_time_uses_365_day_years() {
        let birth = date(2000, 1, 1);
        let c = calc(birth, birth, 1);
        assert_eq!(c.remaining_disposable_time(), 365.0 * 7.0);
    }

    #[test]
    fn future_birth_date_counts_nothing_lived() {
        let c = calc(date(2030, 1, 1), date(2020, 1, 1), 80);
        assert_eq!(c.lived_weeks(), 0);
        assert_eq!(c.lived_time(), TimeBreakdown::default());
        assert!(c.progress_percentage() < 0.0);
    }

    #[test]
    fn distribution_ends_with_free_time() {
        let c = calc(date(2000, 1, 1), date(2020, 1, 1), 80);
        let dist = c.daily_time_distribution();
        assert_eq!(dist[3], (TimeSlice::Free, 7.0));
        let total: f64 = dist.iter().map(|(_, h)| h).sum();
        assert_eq!(total, 24.0);
    }
}
