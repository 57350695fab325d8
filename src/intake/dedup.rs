//! Duplicate detection by canonical label

use crate::error::IntakeResult;
use crate::intake::label::TitleLabel;
use crate::todoist::TaskService;
use tracing::debug;

/// Checks whether a project already holds a task for a title
pub struct DuplicateGuard<'a> {
    service: &'a dyn TaskService,
    project_id: &'a str,
}

impl<'a> DuplicateGuard<'a> {
    pub fn new(service: &'a dyn TaskService, project_id: &'a str) -> Self {
        Self {
            service,
            project_id,
        }
    }

    /// True iff at least one task carries `label`
    pub async fn exists(&self, label: &TitleLabel) -> IntakeResult<bool> {
        let tasks = self
            .service
            .list_tasks(self.project_id, label.as_str())
            .await?;
        debug!(label = %label, matches = tasks.len(), "Duplicate check");
        Ok(!tasks.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntakeError;
    use crate::testing::MockTaskService;

    #[tokio::test]
    async fn test_existing_label_is_detected() {
        let service = MockTaskService::new().with_tasks_labeled("p", "foo-bar", 1);
        let guard = DuplicateGuard::new(&service, "p");

        assert!(guard.exists(&TitleLabel::from_title("foo bar")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_label_is_not_a_duplicate() {
        let service = MockTaskService::new().with_tasks_labeled("p", "foo-bar", 1);
        let guard = DuplicateGuard::new(&service, "p");

        assert!(!guard.exists(&TitleLabel::from_title("foo baz")).await.unwrap());
    }

    #[tokio::test]
    async fn test_label_in_other_project_is_not_a_duplicate() {
        let service = MockTaskService::new().with_tasks_labeled("other", "foo-bar", 1);
        let guard = DuplicateGuard::new(&service, "p");

        assert!(!guard.exists(&TitleLabel::from_title("foo bar")).await.unwrap());
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let service = MockTaskService::new().with_failure(IntakeError::Unauthorized);
        let guard = DuplicateGuard::new(&service, "p");

        let result = guard.exists(&TitleLabel::from_title("foo")).await;
        assert_eq!(result, Err(IntakeError::Unauthorized));
    }
}
