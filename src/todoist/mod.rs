//! Remote task service access
//!
//! [`TaskService`] is the seam the intake pipeline depends on. The production
//! implementation, [`TodoistClient`], maps each operation onto one call
//! through the [`gateway::HttpGateway`].

pub mod gateway;
pub mod types;

pub use gateway::{classify_status, GatewayConfig, HttpGateway, DEFAULT_BASE_URL};
pub use types::{date_label, Due, NewTask, Project, Task};

use crate::error::{IntakeError, IntakeResult};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Operations the intake pipeline needs from the remote task service
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Whether a credential is available; without one no call can succeed
    fn has_credential(&self) -> bool;

    /// List every project visible to the credential, in service order
    async fn list_projects(&self) -> IntakeResult<Vec<Project>>;

    /// List the tasks of a project carrying `label`
    async fn list_tasks(&self, project_id: &str, label: &str) -> IntakeResult<Vec<Task>>;

    /// Create a task and return the service's copy of it
    async fn create_task(&self, task: &NewTask) -> IntakeResult<Task>;
}

/// Todoist REST v2 client
#[derive(Debug, Clone)]
pub struct TodoistClient {
    gateway: HttpGateway,
}

impl TodoistClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// Build the gateway and client in one step
    pub fn from_config(config: GatewayConfig) -> IntakeResult<Self> {
        Ok(Self::new(HttpGateway::new(config)?))
    }

    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }
}

#[async_trait]
impl TaskService for TodoistClient {
    fn has_credential(&self) -> bool {
        self.gateway.has_credential()
    }

    async fn list_projects(&self) -> IntakeResult<Vec<Project>> {
        let body = self
            .gateway
            .execute(Method::GET, "projects", &[], None)
            .await?;
        parse_body(&body)
    }

    async fn list_tasks(&self, project_id: &str, label: &str) -> IntakeResult<Vec<Task>> {
        let body = self
            .gateway
            .execute(
                Method::GET,
                "tasks",
                &[("project_id", project_id), ("label", label)],
                None,
            )
            .await?;
        parse_body(&body)
    }

    async fn create_task(&self, task: &NewTask) -> IntakeResult<Task> {
        let payload = serde_json::to_value(task)
            .map_err(|e| IntakeError::invalid_response(format!("unencodable task: {e}")))?;
        let body = self
            .gateway
            .execute(Method::POST, "tasks", &[], Some(&payload))
            .await?;
        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> IntakeResult<T> {
    serde_json::from_str(body).map_err(|e| IntakeError::invalid_response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        let result: IntakeResult<Vec<Project>> = parse_body("not json");
        assert!(matches!(result, Err(IntakeError::InvalidResponse { .. })));
    }

    #[test]
    fn test_parse_body_empty_list() {
        let tasks: Vec<Task> = parse_body("[]").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_client_credential_follows_gateway() {
        let client = TodoistClient::from_config(GatewayConfig::default()).unwrap();
        assert!(!client.has_credential());
        assert_eq!(client.gateway().base_url(), DEFAULT_BASE_URL);
    }
}
