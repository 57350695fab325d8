//! News Sorter
//!
//! Turns approved chat links into Todoist tasks, once per title, spread over
//! the coming days so no day gets more than its share.
//!
//! # Overview
//!
//! - Remote task service gateway with typed outcome classification
//! - Project resolution at startup
//! - Canonical title labels used for deduplication
//! - Due-date allocation under a per-day capacity
//! - Reaction events, title extraction and a webhook for a chat bridge
//!
//! # Quick Start
//!
//! ```rust
//! use news_sorter::intake::{IntakeOutcome, IntakePipeline, IntakeRequest, SchedulingPolicy};
//! use news_sorter::testing::{FixedClock, MockTaskService};
//! use news_sorter::todoist::Project;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! # tokio_test_block(async {
//! let service = Arc::new(MockTaskService::new());
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let pipeline = IntakePipeline::new(
//!     service.clone(),
//!     Some(Project::new("2203306141", "News")),
//!     SchedulingPolicy::default(),
//!     Arc::new(FixedClock::new(today)),
//! );
//!
//! let outcome = pipeline
//!     .intake(IntakeRequest::new("Go Language", "https://go.dev"))
//!     .await
//!     .unwrap();
//! assert!(matches!(outcome, IntakeOutcome::Created(_)));
//!
//! let created = service.created_tasks().await;
//! assert_eq!(created[0].labels, vec!["Go-Language", "2024-01-10"]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod intake;
pub mod observability;
pub mod testing;
pub mod title;
pub mod todoist;

pub use bot::{ApprovalPolicy, EventKind, ReactionEvent, ReactionHandler, ReactionReply};
pub use config::{ConfigError, Credentials, SorterConfig};
pub use error::{IntakeError, IntakeResult};
pub use intake::{IntakeOutcome, IntakePipeline, IntakeRequest, SchedulingPolicy};
pub use title::{HttpTitleExtractor, TitleExtractor};
pub use todoist::{TaskService, TodoistClient};
