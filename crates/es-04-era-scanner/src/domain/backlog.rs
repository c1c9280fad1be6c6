//! Backlog planning
//!
//! The active era is still accumulating data, so the backlog is
//! `[last + 1, current - 1]`. When `current - last > max_lag` the start is
//! clamped to `current - max_lag` and the skipped head becomes a gap.

use shared_types::{EraGap, EraIndex};
use std::ops::RangeInclusive;

/// Eras one pass must process, plus whatever it has to give up on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backlog {
    pub start: EraIndex,
    /// Inclusive; `end < start` means nothing to do
    pub end: EraIndex,
    pub gap: Option<EraGap>,
}

impl Backlog {
    pub fn plan(last_processed: EraIndex, current: EraIndex, max_lag: u32) -> Self {
        let first_missing = last_processed.saturating_add(1);
        let end = current.saturating_sub(1);

        if current.saturating_sub(last_processed) > max_lag {
            let start = current - max_lag;
            let gap = (start > first_missing).then(|| EraGap {
                from: first_missing,
                to: start - 1,
            });
            return Self { start, end, gap };
        }

        Self {
            start: first_missing,
            end,
            gap: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn eras(&self) -> RangeInclusive<EraIndex> {
        self.start..=self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_from_empty_store() {
        let plan = Backlog::plan(0, 200, 84);
        assert_eq!(plan.eras(), 116..=199);
        assert_eq!(plan.len(), 84);
        assert_eq!(plan.gap, Some(EraGap { from: 1, to: 115 }));
    }

    #[test]
    fn test_within_window_no_gap() {
        let plan = Backlog::plan(100, 150, 84);
        assert_eq!(plan.eras(), 101..=149);
        assert_eq!(plan.gap, None);
    }

    #[test]
    fn test_active_era_excluded() {
        let plan = Backlog::plan(9, 10, 84);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_up_to_date_or_ahead_is_empty() {
        assert!(Backlog::plan(10, 10, 84).is_empty());
        assert!(Backlog::plan(12, 10, 84).is_empty());
        assert!(Backlog::plan(0, 0, 84).is_empty());
    }

    #[test]
    fn test_boundary_of_lag_window() {
        // exactly max_lag behind: no clamp
        let plan = Backlog::plan(16, 100, 84);
        assert_eq!(plan.eras(), 17..=99);
        assert_eq!(plan.gap, None);

        // one more: clamp starts right after last, so nothing is lost
        let plan = Backlog::plan(15, 100, 84);
        assert_eq!(plan.eras(), 16..=99);
        assert_eq!(plan.gap, None);

        // two more: one era lost
        let plan = Backlog::plan(14, 100, 84);
        assert_eq!(plan.eras(), 16..=99);
        assert_eq!(plan.gap, Some(EraGap { from: 15, to: 15 }));
    }

    #[test]
    fn test_lag_of_one_processes_only_previous_era() {
        let plan = Backlog::plan(0, 50, 1);
        assert_eq!(plan.eras(), 49..=49);
        assert_eq!(plan.gap, Some(EraGap { from: 1, to: 48 }));
    }
}
