//! Life calendar: every week of the expected lifespan as a grid cell, 52 per row.

use crate::calculator::HOURS_PER_DAY;

pub const WEEKS_PER_ROW: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekState {
    Lived,
    Remaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCell {
    /// Zero-based week index since birth.
    pub index: usize,
    pub state: WeekState,
}

/// Built from [`LifeCalculator::calendar`](crate::LifeCalculator::calendar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeCalendar {
    total_weeks: usize,
    lived_weeks: usize,
    disposable_hours_per_day: f64,
}

impl LifeCalendar {
    /// `lived_weeks` above `total_weeks` is kept: every cell then reads as lived.
    pub fn new(total_weeks: usize, lived_weeks: usize, disposable_hours_per_day: f64) -> Self {
        Self {
            total_weeks,
            lived_weeks,
            disposable_hours_per_day,
        }
    }

    pub fn total_weeks(&self) -> usize {
        self.total_weeks
    }

    pub fn lived_weeks(&self) -> usize {
        self.lived_weeks.min(self.total_weeks)
    }

    pub fn remaining_weeks(&self) -> usize {
        self.total_weeks.saturating_sub(self.lived_weeks)
    }

    pub fn row_count(&self) -> usize {
        self.total_weeks.div_ceil(WEEKS_PER_ROW)
    }

    pub fn cell(&self, index: usize) -> Option<WeekCell> {
        if index >= self.total_weeks {
            return None;
        }
        let state = if index < self.lived_weeks {
            WeekState::Lived
        } else {
            WeekState::Remaining
        };
        Some(WeekCell { index, state })
    }

    /// One row of up to 52 cells; the last row may be short. `None` past the end.
    pub fn row(&self, row: usize) -> Option<Vec<WeekCell>> {
        if row >= self.row_count() {
            return None;
        }
        let start = row * WEEKS_PER_ROW;
        let end = (start + WEEKS_PER_ROW).min(self.total_weeks);
        Some((start..end).filter_map(|i| self.cell(i)).collect())
    }

    pub fn page_count(&self, rows_per_page: usize) -> usize {
        if rows_per_page == 0 {
            return 0;
        }
        self.row_count().div_ceil(rows_per_page)
    }

    /// Rows `page * rows_per_page ..` for one screen of the calendar. Empty past the end.
    pub fn page(&self, page: usize, rows_per_page: usize) -> Vec<Vec<WeekCell>> {
        let first = page.saturating_mul(rows_per_page);
        (first..first.saturating_add(rows_per_page))
            .map_while(|r| self.row(r))
            .collect()
    }

    /// Row holding the current week, for scrolling the calendar into view.
    pub fn current_row(&self) -> Option<usize> {
        if self.total_weeks == 0 {
            return None;
        }
        Some(self.lived_weeks.min(self.total_weeks - 1) / WEEKS_PER_ROW)
    }

    /// Disposable hours left across the remaining whole weeks.
    pub fn remaining_disposable_hours(&self) -> f64 {
        (self.remaining_weeks() as f64 * 7.0 * self.disposable_hours_per_day).max(0.0)
    }

    /// [`Self::remaining_disposable_hours`] expressed in 24-hour days.
    pub fn remaining_disposable_days(&self) -> f64 {
        self.remaining_disposable_hours() / HOURS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_hold_fifty_two_weeks_with_short_tail() {
        let cal = LifeCalendar::new(4171, 1560, 7.0);
        assert_eq!(cal.row_count(), 81);
        assert_eq!(cal.row(0).unwrap().len(), 52);
        assert_eq!(cal.row(80).unwrap().len(), 4171 - 80 * 52);
        assert!(cal.row(81).is_none());
    }

    #[test]
    fn cells_split_at_lived_weeks() {
        let cal = LifeCalendar::new(104, 60, 7.0);
        let second = cal.row(1).unwrap();
        assert_eq!(second[7], WeekCell { index: 59, state: WeekState::Lived });
        assert_eq!(second[8], WeekCell { index: 60, state: WeekState::Remaining });
        assert!(cal.cell(104).is_none());
        assert_eq!(cal.current_row(), Some(1));
    }

    #[test]
    fn paging_covers_every_row_once() {
        let cal = LifeCalendar::new(52 * 10 + 3, 0, 5.0);
        assert_eq!(cal.page_count(4), 3);
        let rows: usize = (0..cal.page_count(4)).map(|p| cal.page(p, 4).len()).sum();
        assert_eq!(rows, cal.row_count());
        assert_eq!(cal.page(2, 4).len(), 3);
        assert!(cal.page(3, 4).is_empty());
        assert_eq!(cal.page_count(0), 0);
        assert!(cal.page(0, 0).is_empty());
    }

    #[test]
    fn remaining_disposable_hours_by_week() {
        let cal = LifeCalendar::new(100, 40, 5.0);
        assert_eq!(cal.remaining_weeks(), 60);
        assert_eq!(cal.remaining_disposable_hours(), 60.0 * 7.0 * 5.0);
        assert_eq!(cal.remaining_disposable_days(), 60.0 * 7.0 * 5.0 / 24.0);
    }

    #[test]
    fn overlived_calendar_is_fully_lived() {
        let cal = LifeCalendar::new(10, 25, 5.0);
        assert_eq!(cal.lived_weeks(), 10);
        assert_eq!(cal.remaining_weeks(), 0);
        assert!(cal.row(0).unwrap().iter().all(|c| c.state == WeekState::Lived));
        assert_eq!(cal.current_row(), Some(0));
    }

    #[test]
    fn empty_calendar() {
        let cal = LifeCalendar::new(0, 0, 7.0);
        assert_eq!(cal.row_count(), 0);
        assert!(cal.row(0).is_none());
        assert!(cal.current_row().is_none());
    }
}
