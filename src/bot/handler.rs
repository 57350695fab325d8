//! Reaction handling: approved link -> title -> intake -> reply
//!
//! The reply tells the bridge what to post back. Duplicates come back as
//! `Skipped` and are not meant to be shown to anyone; every other failure
//! carries a message for the channel that triggered it.

use crate::bot::events::{ApprovalPolicy, EventKind, ReactionEvent};
use crate::intake::{IntakeOutcome, IntakePipeline, IntakeRequest};
use crate::reaction_span;
use crate::title::TitleExtractor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, Instrument};

/// What happened to a reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReactionReply {
    /// The emoji is not an approval
    Ignored,
    /// A task was created
    Created {
        task_id: String,
        label: String,
        due_date: Option<String>,
    },
    /// A task for this title already exists
    Skipped { label: String },
    /// Intake failed; `message` is meant for the originating channel
    Failed { message: String },
}

impl ReactionReply {
    pub fn is_failure(&self) -> bool {
        matches!(self, ReactionReply::Failed { .. })
    }
}

/// Dispatches reaction events into the intake pipeline
pub struct ReactionHandler {
    pipeline: Arc<IntakePipeline>,
    extractor: Arc<dyn TitleExtractor>,
    approvals: ApprovalPolicy,
}

impl ReactionHandler {
    pub fn new(
        pipeline: Arc<IntakePipeline>,
        extractor: Arc<dyn TitleExtractor>,
        approvals: ApprovalPolicy,
    ) -> Self {
        Self {
            pipeline,
            extractor,
            approvals,
        }
    }

    pub fn pipeline(&self) -> &IntakePipeline {
        &self.pipeline
    }

    /// Handle one reaction event
    pub async fn handle(&self, event: &ReactionEvent) -> ReactionReply {
        let span = reaction_span!(
            channel_id = %event.channel_id,
            message_id = %event.message_id,
            emoji = %event.emoji
        );
        self.dispatch(event).instrument(span).await
    }

    async fn dispatch(&self, event: &ReactionEvent) -> ReactionReply {
        match self.approvals.classify(&event.emoji) {
            EventKind::ReactionOther => {
                debug!("Reaction is not an approval, ignoring");
                ReactionReply::Ignored
            }
            EventKind::ReactionApproved => self.intake_link(&event.message_text).await,
        }
    }

    /// Extract the title behind `link` and run it through the pipeline
    pub async fn intake_link(&self, link: &str) -> ReactionReply {
        let title = match self.extractor.extract(link).await {
            Ok(title) => title,
            Err(e) => {
                error!(error = %e, "Title extraction failed");
                return ReactionReply::Failed {
                    message: e.user_message(),
                };
            }
        };

        match self
            .pipeline
            .intake(IntakeRequest::new(title, link.trim()))
            .await
        {
            Ok(IntakeOutcome::Created(task)) => {
                let label = task.labels.first().cloned().unwrap_or_default();
                info!(task_id = %task.id, label = %label, "Reaction turned into task");
                ReactionReply::Created {
                    task_id: task.id,
                    label,
                    due_date: task.due.map(|due| due.date),
                }
            }
            Ok(IntakeOutcome::AlreadyExists { label }) => ReactionReply::Skipped {
                label: label.into_inner(),
            },
            Err(e) => {
                error!(error = %e, "Intake failed");
                ReactionReply::Failed {
                    message: e.user_message(),
                }
            }
        }
    }
}
