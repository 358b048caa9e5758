//! Progression through the 21-day plan.
//!
//! Only the set of completed days is stored. The current focus day and the
//! lock status of every day are derived from it on demand and never persisted.

use crate::{
    core::{
        plan::{ContentCatalog, DailyGuidance},
        store::{self, keys},
    },
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Days the user has marked as done. Serialized as an ascending array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedDays(BTreeSet<u32>);

impl CompletedDays {
    /// Whether `day` has been marked as done.
    #[must_use]
    pub fn contains(&self, day: u32) -> bool {
        self.0.contains(&day)
    }

    /// Number of completed days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no day has been completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completed days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Drops any day that is not part of `catalog`'s plan.
    ///
    /// # Returns
    /// How many days were dropped
    pub fn retain_plan_days(&mut self, catalog: &ContentCatalog) -> usize {
        let before = self.0.len();
        self.0.retain(|day| catalog.contains_day(*day));
        before - self.0.len()
    }
}

impl FromIterator<u32> for CompletedDays {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of toggling a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The day was added; worth celebrating
    Completed(u32),
    /// The day was removed
    Uncompleted(u32),
}

/// How a day is presented on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// Marked as done
    Completed,
    /// The focus day, not yet done
    Current,
    /// Not reachable until the focus day moves past it
    Locked,
}

/// The lowest plan day not yet completed, or the last day once everything is done.
#[must_use]
pub fn current_focus_day(catalog: &ContentCatalog, completed: &CompletedDays) -> u32 {
    catalog
        .day_numbers()
        .find(|day| !completed.contains(*day))
        .unwrap_or_else(|| catalog.last_day())
}

/// A day is locked when it lies beyond the focus day and has not been completed.
#[must_use]
pub fn is_locked(catalog: &ContentCatalog, completed: &CompletedDays, day: u32) -> bool {
    day > current_focus_day(catalog, completed) && !completed.contains(day)
}

/// Status of one day: completed, locked, or open to be completed.
///
/// # Arguments
/// * `catalog` - The plan
/// * `completed` - Days marked as done
/// * `day` - Plan day to classify
///
/// # Returns
/// `DayStatus::Current` for the focus day and for any earlier day that was
/// un-completed
#[must_use]
pub fn day_status(catalog: &ContentCatalog, completed: &CompletedDays, day: u32) -> DayStatus {
    if completed.contains(day) {
        DayStatus::Completed
    } else if is_locked(catalog, completed, day) {
        DayStatus::Locked
    } else {
        DayStatus::Current
    }
}

/// Adds `day` if absent, removes it if present.
///
/// Any day may be un-completed, which can move the focus day backward.
///
/// # Errors
/// Returns `Error::DayNotInPlan` for a day the plan does not contain.
pub fn toggle_day(
    catalog: &ContentCatalog,
    completed: &mut CompletedDays,
    day: u32,
) -> Result<ToggleOutcome> {
    if !catalog.contains_day(day) {
        return Err(Error::DayNotInPlan { day });
    }

    if completed.0.remove(&day) {
        Ok(ToggleOutcome::Uncompleted(day))
    } else {
        completed.0.insert(day);
        Ok(ToggleOutcome::Completed(day))
    }
}

/// One row of the plan overview.
#[derive(Debug, Clone, Copy)]
pub struct DayOverview<'a> {
    /// The day's catalog entry
    pub guidance: &'a DailyGuidance,
    /// How the day is presented
    pub status: DayStatus,
}

/// Everything the dashboard shows, derived in one pass.
#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    /// Number of completed days
    pub completed_count: usize,
    /// 0-100
    pub progress_percent: f64,
    /// Lowest day not yet done, or the last day once all are done
    pub focus_day: u32,
    /// True only when the whole plan is complete
    pub focus_done: bool,
    /// Every plan day in order
    pub days: Vec<DayOverview<'a>>,
}

impl<'a> DashboardSummary<'a> {
    /// Guidance for the focus day.
    #[must_use]
    pub fn focus(&self) -> Option<&'a DailyGuidance> {
        self.days
            .iter()
            .find(|overview| overview.guidance.day == self.focus_day)
            .map(|overview| overview.guidance)
    }
}

/// Builds the dashboard summary for the current progress.
///
/// # Arguments
/// * `catalog` - The plan
/// * `completed` - Days marked as done
///
/// # Returns
/// A `DashboardSummary` borrowing its day entries from `catalog`
#[must_use]
pub fn dashboard<'a>(
    catalog: &'a ContentCatalog,
    completed: &CompletedDays,
) -> DashboardSummary<'a> {
    let focus_day = current_focus_day(catalog, completed);
    let total = catalog.days.len().max(1);

    #[allow(clippy::cast_precision_loss)]
    let progress_percent = ((completed.len() as f64 / total as f64) * 100.0).min(100.0);

    let days = catalog
        .days
        .iter()
        .map(|guidance| DayOverview {
            guidance,
            status: day_status(catalog, completed, guidance.day),
        })
        .collect();

    DashboardSummary {
        completed_count: completed.len(),
        progress_percent,
        focus_day,
        focus_done: completed.contains(focus_day),
        days,
    }
}

/// Loads the completed days, discarding anything outside the plan.
pub async fn load_completed_days<C: ConnectionTrait>(
    db: &C,
    catalog: &ContentCatalog,
) -> Result<CompletedDays> {
    let mut completed: CompletedDays = store::load_or_default(db, keys::COMPLETED_DAYS).await?;
    let dropped = completed.retain_plan_days(catalog);
    if dropped > 0 {
        warn!("Ignored {dropped} stored completed days outside the plan");
    }
    Ok(completed)
}

/// Writes the completed set as an ascending array.
pub async fn save_completed_days<C: ConnectionTrait>(
    db: &C,
    completed: &CompletedDays,
) -> Result<()> {
    store::save(db, keys::COMPLETED_DAYS, completed).await?;
    info!("Saved {} completed days", completed.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{setup_test_db, test_catalog, write_raw};

    fn days(values: &[u32]) -> CompletedDays {
        values.iter().copied().collect()
    }

    #[test]
    fn test_empty_set_focuses_day_one() {
        let catalog = test_catalog();
        assert_eq!(current_focus_day(&catalog, &CompletedDays::default()), 1);
    }

    #[test]
    fn test_focus_is_lowest_missing_day() {
        let catalog = test_catalog();

        assert_eq!(current_focus_day(&catalog, &days(&[1, 2, 3])), 4);
        assert_eq!(current_focus_day(&catalog, &days(&[2, 3, 4])), 1);
        assert_eq!(current_focus_day(&catalog, &days(&[1, 2, 5, 9])), 3);
    }

    #[test]
    fn test_focus_matches_min_of_missing_days_for_every_prefix_gap() {
        let catalog = test_catalog();
        for gap in 1..=21_u32 {
            let completed: CompletedDays = (1..=21).filter(|d| *d != gap).collect();
            assert_eq!(current_focus_day(&catalog, &completed), gap);
        }
    }

    #[test]
    fn test_all_done_focuses_last_day() {
        let catalog = test_catalog();
        let completed: CompletedDays = (1..=21).collect();
        assert_eq!(current_focus_day(&catalog, &completed), 21);
    }

    #[test]
    fn test_lock_rule_after_three_days() {
        let catalog = test_catalog();
        let completed = days(&[1, 2, 3]);

        assert!(is_locked(&catalog, &completed, 6));
        assert!(!is_locked(&catalog, &completed, 4));
        assert!(!is_locked(&catalog, &completed, 2));
        assert_eq!(day_status(&catalog, &completed, 4), DayStatus::Current);
        assert_eq!(day_status(&catalog, &completed, 2), DayStatus::Completed);
        assert_eq!(day_status(&catalog, &completed, 21), DayStatus::Locked);
    }

    #[test]
    fn test_completed_days_beyond_focus_stay_unlocked() {
        let catalog = test_catalog();
        let completed = days(&[1, 7]);

        assert_eq!(current_focus_day(&catalog, &completed), 2);
        assert!(!is_locked(&catalog, &completed, 7));
        assert!(is_locked(&catalog, &completed, 3));
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let catalog = test_catalog();
        let mut completed = days(&[1, 2]);
        let before = completed.clone();

        assert_eq!(toggle_day(&catalog, &mut completed, 3).unwrap(), ToggleOutcome::Completed(3));
        assert_eq!(toggle_day(&catalog, &mut completed, 3).unwrap(), ToggleOutcome::Uncompleted(3));
        assert_eq!(completed, before);
    }

    #[test]
    fn test_uncompleting_past_day_moves_focus_back() {
        let catalog = test_catalog();
        let mut completed = days(&[1, 2, 3, 4]);

        toggle_day(&catalog, &mut completed, 2).unwrap();
        assert_eq!(current_focus_day(&catalog, &completed), 2);
    }

    #[test]
    fn test_toggle_rejects_days_outside_plan() {
        let catalog = test_catalog();
        let mut completed = CompletedDays::default();

        assert!(matches!(
            toggle_day(&catalog, &mut completed, 0),
            Err(Error::DayNotInPlan { day: 0 })
        ));
        assert!(matches!(
            toggle_day(&catalog, &mut completed, 22),
            Err(Error::DayNotInPlan { day: 22 })
        ));
        assert!(completed.is_empty());
    }

    #[test]
    fn test_dashboard_summary() {
        let catalog = test_catalog();
        let completed = days(&[1, 2, 3]);

        let summary = dashboard(&catalog, &completed);

        assert_eq!(summary.completed_count, 3);
        assert_eq!(summary.focus_day, 4);
        assert!(!summary.focus_done);
        assert_eq!(summary.focus().unwrap().day, 4);
        assert_eq!(summary.days.len(), 21);
        assert!((summary.progress_percent - 300.0 / 21.0).abs() < 1e-9);
        assert_eq!(
            summary.days.iter().filter(|d| d.status == DayStatus::Locked).count(),
            17
        );
    }

    #[test]
    fn test_dashboard_when_everything_is_done() {
        let catalog = test_catalog();
        let completed: CompletedDays = (1..=21).collect();

        let summary = dashboard(&catalog, &completed);
        assert_eq!(summary.progress_percent, 100.0);
        assert_eq!(summary.focus_day, 21);
        assert!(summary.focus_done);
    }

    #[tokio::test]
    async fn test_stored_days_outside_plan_are_dropped() -> Result<()> {
        let db = setup_test_db().await?;
        let catalog = test_catalog();
        write_raw(&db, keys::COMPLETED_DAYS, "[3, 1, 40, 0, 2]").await?;

        let completed = load_completed_days(&db, &catalog).await?;
        assert_eq!(completed, days(&[1, 2, 3]));
        Ok(())
    }

    #[tokio::test]
    async fn test_completed_days_persist_as_array() -> Result<()> {
        let db = setup_test_db().await?;
        let catalog = test_catalog();

        save_completed_days(&db, &days(&[5, 1])).await?;
        let raw: Option<Vec<u32>> = store::load(&db, keys::COMPLETED_DAYS).await?;
        assert_eq!(raw, Some(vec![1, 5]));

        assert_eq!(load_completed_days(&db, &catalog).await?, days(&[1, 5]));
        Ok(())
    }
}
