//! Task intake pipeline
//!
//! One call to [`IntakePipeline::intake`] makes exactly one pass through
//! these stages:
//!
//! ```text
//! Normalizing -> CheckingDuplicate -> AllocatingDueDate -> BuildingTask -> Submitting
//!                       |
//!                       +-> AlreadyExists (terminal, no task created)
//! ```
//!
//! The pipeline holds no mutable state. The resolved project is injected at
//! construction and never changes, so one instance can serve concurrent
//! intake calls behind an `Arc`.

use crate::error::{IntakeError, IntakeResult};
use crate::intake::allocator::{DueDateAllocator, SchedulingPolicy};
use crate::intake::clock::Clock;
use crate::intake::dedup::DuplicateGuard;
use crate::intake::label::TitleLabel;
use crate::intake_span;
use crate::todoist::{date_label, NewTask, Project, Task, TaskService};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// A request to turn a title and description into a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRequest {
    pub title: String,
    pub description: String,
}

impl IntakeRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Terminal, non-failing outcomes of an intake call
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// The task was submitted; carries the service's copy
    Created(Task),
    /// A task with the same canonical label already exists; nothing was sent
    AlreadyExists { label: TitleLabel },
}

/// Stage names, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStage {
    Normalizing,
    CheckingDuplicate,
    AllocatingDueDate,
    BuildingTask,
    Submitting,
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntakeStage::Normalizing => "normalizing",
            IntakeStage::CheckingDuplicate => "checking_duplicate",
            IntakeStage::AllocatingDueDate => "allocating_due_date",
            IntakeStage::BuildingTask => "building_task",
            IntakeStage::Submitting => "submitting",
        };
        f.write_str(name)
    }
}

/// Orchestrates normalization, duplicate check, allocation and submission
pub struct IntakePipeline {
    service: Arc<dyn TaskService>,
    project: Option<Project>,
    policy: SchedulingPolicy,
    clock: Arc<dyn Clock>,
}

impl IntakePipeline {
    /// Build a pipeline around an already resolved project
    ///
    /// With `project = None` every intake call fails with
    /// [`IntakeError::NotInitialized`].
    pub fn new(
        service: Arc<dyn TaskService>,
        project: Option<Project>,
        policy: SchedulingPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            service,
            project,
            policy,
            clock,
        }
    }

    /// Resolve `project_name` and build a pipeline bound to it
    ///
    /// When the service has no credential, resolution is skipped without any
    /// network call and the pipeline comes back uninitialized.
    pub async fn initialize(
        service: Arc<dyn TaskService>,
        project_name: &str,
        policy: SchedulingPolicy,
        clock: Arc<dyn Clock>,
    ) -> IntakeResult<Self> {
        if !service.has_credential() {
            warn!("No task service credential, pipeline left uninitialized");
            return Ok(Self::new(service, None, policy, clock));
        }

        let project =
            crate::intake::project::resolve_project(service.as_ref(), project_name).await?;
        Ok(Self::new(service, Some(project), policy, clock))
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.project.is_some()
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Run one intake pass
    pub async fn intake(&self, request: IntakeRequest) -> IntakeResult<IntakeOutcome> {
        let intake_id = Uuid::new_v4();
        let span = intake_span!(intake_id = %intake_id, title = %request.title);
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: IntakeRequest) -> IntakeResult<IntakeOutcome> {
        let project = self.project.as_ref().ok_or(IntakeError::NotInitialized)?;
        let service = self.service.as_ref();

        debug!(stage = %IntakeStage::Normalizing, "Intake stage");
        let label = TitleLabel::from_title(&request.title);

        debug!(stage = %IntakeStage::CheckingDuplicate, label = %label, "Intake stage");
        if DuplicateGuard::new(service, &project.id).exists(&label).await? {
            info!(label = %label, "Task already exists, skipping");
            return Ok(IntakeOutcome::AlreadyExists { label });
        }

        debug!(stage = %IntakeStage::AllocatingDueDate, "Intake stage");
        let today = self.clock.today();
        let allocation = DueDateAllocator::new(service, &project.id, self.policy)
            .allocate(today)
            .await?;
        let due_date = allocation.date();

        debug!(stage = %IntakeStage::BuildingTask, due_date = %due_date, "Intake stage");
        let task = NewTask {
            project_id: project.id.clone(),
            content: request.title,
            description: request.description,
            labels: vec![label.into_inner(), date_label(due_date)],
            due_date: Some(due_date),
        };

        debug!(stage = %IntakeStage::Submitting, "Intake stage");
        let created = service.create_task(&task).await?;
        info!(
            task_id = %created.id,
            due_date = %due_date,
            degraded = allocation.is_degraded(),
            "Task created"
        );

        Ok(IntakeOutcome::Created(created))
    }
}
