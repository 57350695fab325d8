//! Observability: structured logging and span helpers

pub mod logging;

// Re-export for convenience
pub use logging::{
    init_default_logging, init_default_logging_with, init_logging, level_for_verbosity, parse_level,
    LogFormat,
};

// Span macros for structured logging
pub use logging::{gateway_span, intake_span, reaction_span};
