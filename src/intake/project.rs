//! Project resolution by name

use crate::error::{IntakeError, IntakeResult};
use crate::todoist::{Project, TaskService};
use tracing::{debug, info};

/// Find the project called `project_name` (exact, case-sensitive)
///
/// When the service returns several projects with that name, the first one in
/// service order is used.
pub async fn resolve_project(
    service: &dyn TaskService,
    project_name: &str,
) -> IntakeResult<Project> {
    let projects = service.list_projects().await?;
    debug!(count = projects.len(), "Fetched projects");

    match projects.into_iter().find(|p| p.name == project_name) {
        Some(project) => {
            info!(project_id = %project.id, project_name, "Resolved project");
            Ok(project)
        }
        None => Err(IntakeError::ProjectNotFound {
            name: project_name.to_string(),
        }),
    }
}
