//! Due-date allocation under a per-day capacity
//!
//! Tasks carry their due date as a label. Starting at a given day, the
//! allocator counts the tasks labeled with each day in turn and picks the first
//! day that still has room. The scan is sequential because every step depends
//! on the previous answer.
//!
//! When the whole look-ahead window is full the last day checked is returned
//! as a degraded allocation: a task is never refused for lack of room, it just
//! lands on an overloaded day.

use crate::error::IntakeResult;
use crate::todoist::{date_label, TaskService};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Capacity and window used for due-date allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    /// Maximum number of tasks per calendar day
    #[serde(default = "default_capacity_per_day")]
    pub capacity_per_day: usize,
    /// Number of consecutive days examined, today included
    #[serde(default = "default_max_lookahead_days")]
    pub max_lookahead_days: u32,
}

fn default_capacity_per_day() -> usize {
    5
}

fn default_max_lookahead_days() -> u32 {
    30
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            capacity_per_day: default_capacity_per_day(),
            max_lookahead_days: default_max_lookahead_days(),
        }
    }
}

/// Result of an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A day below capacity was found
    Balanced(NaiveDate),
    /// Every day in the window was full; this is the last one checked
    Degraded(NaiveDate),
}

impl Allocation {
    pub fn date(&self) -> NaiveDate {
        match self {
            Allocation::Balanced(date) | Allocation::Degraded(date) => *date,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Allocation::Degraded(_))
    }
}

/// Finds the earliest day with spare capacity within a project
pub struct DueDateAllocator<'a> {
    service: &'a dyn TaskService,
    project_id: &'a str,
    policy: SchedulingPolicy,
}

impl<'a> DueDateAllocator<'a> {
    pub fn new(service: &'a dyn TaskService, project_id: &'a str, policy: SchedulingPolicy) -> Self {
        Self {
            service,
            project_id,
            policy,
        }
    }

    /// Allocate a due date, scanning forward from `start` (inclusive)
    pub async fn allocate(&self, start: NaiveDate) -> IntakeResult<Allocation> {
        // A zero-day window still checks the start day.
        let window = self.policy.max_lookahead_days.max(1) as usize;
        let mut last_checked = start;

        for day in start.iter_days().take(window) {
            last_checked = day;
            let label = date_label(day);
            let scheduled = self.service.list_tasks(self.project_id, &label).await?.len();
            debug!(day = %label, scheduled, capacity = self.policy.capacity_per_day, "Checked day");

            if scheduled < self.policy.capacity_per_day {
                return Ok(Allocation::Balanced(day));
            }
        }

        warn!(
            start = %start,
            window,
            fallback = %last_checked,
            "No day below capacity in look-ahead window, using last day checked"
        );
        Ok(Allocation::Degraded(last_checked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntakeError;
    use crate::testing::MockTaskService;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn policy(capacity_per_day: usize, max_lookahead_days: u32) -> SchedulingPolicy {
        SchedulingPolicy {
            capacity_per_day,
            max_lookahead_days,
        }
    }

    #[test]
    fn test_policy_defaults() {
        let policy = SchedulingPolicy::default();
        assert_eq!(policy.capacity_per_day, 5);
        assert_eq!(policy.max_lookahead_days, 30);
    }

    #[tokio::test]
    async fn test_empty_day_is_allocated() {
        let service = MockTaskService::new();
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 30));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation, Allocation::Balanced(day(10)));
        assert_eq!(service.label_queries().await, vec!["2024-01-10"]);
    }

    #[tokio::test]
    async fn test_day_one_below_capacity_is_kept() {
        let service = MockTaskService::new().with_tasks_labeled("p", "2024-01-10", 4);
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 3));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation.date(), day(10));
        assert!(!allocation.is_degraded());
    }

    #[tokio::test]
    async fn test_full_day_advances_to_next() {
        let service = MockTaskService::new().with_tasks_labeled("p", "2024-01-10", 5);
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 30));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation, Allocation::Balanced(day(11)));
    }

    #[tokio::test]
    async fn test_saturated_window_degrades_to_last_day() {
        let service = MockTaskService::new()
            .with_tasks_labeled("p", "2024-01-10", 2)
            .with_tasks_labeled("p", "2024-01-11", 3)
            .with_tasks_labeled("p", "2024-01-12", 2);
        let allocator = DueDateAllocator::new(&service, "p", policy(2, 3));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation, Allocation::Degraded(day(12)));
        assert_eq!(service.label_queries().await.len(), 3);
    }

    #[tokio::test]
    async fn test_tasks_in_other_projects_do_not_count() {
        let service = MockTaskService::new().with_tasks_labeled("other", "2024-01-10", 9);
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 30));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation, Allocation::Balanced(day(10)));
    }

    #[tokio::test]
    async fn test_zero_window_checks_start_day() {
        let service = MockTaskService::new().with_tasks_labeled("p", "2024-01-10", 5);
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 0));

        let allocation = allocator.allocate(day(10)).await.unwrap();
        assert_eq!(allocation, Allocation::Degraded(day(10)));
    }

    #[tokio::test]
    async fn test_scan_crosses_month_boundary() {
        let service = MockTaskService::new().with_tasks_labeled("p", "2024-01-31", 1);
        let allocator = DueDateAllocator::new(&service, "p", policy(1, 5));

        let allocation = allocator.allocate(day(31)).await.unwrap();
        assert_eq!(
            allocation,
            Allocation::Balanced(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
    }

    #[tokio::test]
    async fn test_service_failure_aborts_scan() {
        let service = MockTaskService::new().with_failure(IntakeError::RequestFailed {
            status: 503,
            body: "maintenance".to_string(),
        });
        let allocator = DueDateAllocator::new(&service, "p", policy(5, 30));

        let result = allocator.allocate(day(10)).await;
        assert!(matches!(
            result,
            Err(IntakeError::RequestFailed { status: 503, .. })
        ));
    }
}
