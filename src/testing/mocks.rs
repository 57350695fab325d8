//! Mock implementations for testing
//!
//! Provides an in-memory TaskService, a stub TitleExtractor and a fixed
//! Clock so the pipeline and the reaction handler can be exercised without a
//! network.

use crate::error::{IntakeError, IntakeResult};
use crate::intake::clock::Clock;
use crate::title::TitleExtractor;
use crate::todoist::{Due, NewTask, Project, Task, TaskService};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory task service
///
/// Created tasks are stored, so a second intake of the same title sees the
/// first one. Every call is counted.
#[derive(Debug)]
pub struct MockTaskService {
    pub projects: Vec<Project>,
    pub tasks: Arc<Mutex<Vec<Task>>>,
    pub created: Arc<Mutex<Vec<NewTask>>>,
    pub label_queries: Arc<Mutex<Vec<String>>>,
    pub failure: Option<IntakeError>,
    pub create_failure: Option<IntakeError>,
    pub credential: bool,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl Default for MockTaskService {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            tasks: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            label_queries: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            create_failure: None,
            credential: true,
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
        }
    }
}

impl MockTaskService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, id: &str, name: &str) -> Self {
        self.projects.push(Project::new(id, name));
        self
    }

    /// Seed `count` existing tasks in `project_id` carrying `label`
    pub fn with_tasks_labeled(self, project_id: &str, label: &str, count: usize) -> Self {
        {
            let mut tasks = self.tasks.try_lock().expect("mock not shared yet");
            for _ in 0..count {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                tasks.push(Task {
                    id: format!("seed-{id}"),
                    project_id: Some(project_id.to_string()),
                    content: format!("seeded {label}"),
                    description: String::new(),
                    labels: vec![label.to_string()],
                    due: None,
                    is_completed: false,
                    url: None,
                    created_at: None,
                });
            }
        }
        self
    }

    /// Fail every call with `error`
    pub fn with_failure(mut self, error: IntakeError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Fail only create-task calls with `error`
    pub fn with_create_failure(mut self, error: IntakeError) -> Self {
        self.create_failure = Some(error);
        self
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    /// Total number of service calls made
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn created_tasks(&self) -> Vec<NewTask> {
        self.created.lock().await.clone()
    }

    /// Labels queried through `list_tasks`, in call order
    pub async fn label_queries(&self) -> Vec<String> {
        self.label_queries.lock().await.clone()
    }

    fn record_call(&self) -> IntakeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TaskService for MockTaskService {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn list_projects(&self) -> IntakeResult<Vec<Project>> {
        self.record_call()?;
        Ok(self.projects.clone())
    }

    async fn list_tasks(&self, project_id: &str, label: &str) -> IntakeResult<Vec<Task>> {
        self.label_queries.lock().await.push(label.to_string());
        self.record_call()?;

        let tasks = self.tasks.lock().await;
        Ok(tasks
            .iter()
            .filter(|t| t.project_id.as_deref() == Some(project_id))
            .filter(|t| t.labels.iter().any(|l| l == label))
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> IntakeResult<Task> {
        self.record_call()?;
        if let Some(error) = &self.create_failure {
            return Err(error.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Task {
            id: format!("task-{id}"),
            project_id: Some(task.project_id.clone()),
            content: task.content.clone(),
            description: task.description.clone(),
            labels: task.labels.clone(),
            due: task.due_date.map(|date| Due {
                date: date.format("%Y-%m-%d").to_string(),
                text: None,
                is_recurring: false,
                datetime: None,
                timezone: None,
            }),
            is_completed: false,
            url: None,
            created_at: None,
        };

        self.created.lock().await.push(task.clone());
        self.tasks.lock().await.push(stored.clone());
        Ok(stored)
    }
}

/// Title extractor answering from a fixed table
#[derive(Debug, Default, Clone)]
pub struct StubTitleExtractor {
    pub titles: HashMap<String, String>,
}

impl StubTitleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, url: &str, title: &str) -> Self {
        self.titles.insert(url.to_string(), title.to_string());
        self
    }
}

#[async_trait]
impl TitleExtractor for StubTitleExtractor {
    async fn extract(&self, url: &str) -> IntakeResult<String> {
        self.titles
            .get(url)
            .cloned()
            .ok_or_else(|| IntakeError::title_unavailable(url, "no stubbed title"))
    }
}

/// Clock frozen on one day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
