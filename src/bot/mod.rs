//! Chat-facing side of the sorter: reaction events, their handling, and the
//! webhook that receives them.

pub mod events;
pub mod handler;
pub mod server;

pub use events::{ApprovalPolicy, EventKind, ReactionEvent};
pub use handler::{ReactionHandler, ReactionReply};
pub use server::ReactionServer;
