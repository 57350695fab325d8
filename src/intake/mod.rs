//! Task intake: normalize, deduplicate, allocate, submit

pub mod allocator;
pub mod clock;
pub mod dedup;
pub mod label;
pub mod pipeline;
pub mod project;

pub use allocator::{Allocation, DueDateAllocator, SchedulingPolicy};
pub use clock::{Clock, SystemClock};
pub use dedup::DuplicateGuard;
pub use label::{normalize_title, TitleLabel};
pub use pipeline::{IntakeOutcome, IntakePipeline, IntakeRequest, IntakeStage};
pub use project::resolve_project;
