//! Tests for logging configuration and format parsing
//!
//! Covers the pure functions behind `LOG_FORMAT`, `LOG_LEVEL` and the CLI
//! verbosity flag.

use news_sorter::observability::logging::{level_for_verbosity, parse_level, LogFormat};
use news_sorter::observability::init_logging;
use tracing::Level;

#[test]
fn test_log_format_parse_json() {
    assert!(matches!(LogFormat::parse("json"), LogFormat::Json));
    assert!(matches!(LogFormat::parse("JSON"), LogFormat::Json));
    assert!(matches!(LogFormat::parse("Json"), LogFormat::Json));
}

#[test]
fn test_log_format_parse_pretty_and_compact() {
    assert!(matches!(LogFormat::parse("pretty"), LogFormat::Pretty));
    assert!(matches!(LogFormat::parse("PRETTY"), LogFormat::Pretty));
    assert!(matches!(LogFormat::parse("compact"), LogFormat::Compact));
    assert!(matches!(LogFormat::parse("Compact"), LogFormat::Compact));
}

#[test]
fn test_log_format_parse_invalid_defaults_to_json() {
    for input in ["invalid", "", "xml", "yaml", "123"] {
        assert!(
            matches!(LogFormat::parse(input), LogFormat::Json),
            "input {input:?}"
        );
    }
}

#[test]
fn test_log_format_parse_whitespace() {
    assert!(matches!(LogFormat::parse("  json  "), LogFormat::Json));
    assert!(matches!(LogFormat::parse("pretty\n"), LogFormat::Pretty));
    assert!(matches!(LogFormat::parse("\tcompact"), LogFormat::Compact));
}

#[test]
fn test_parse_level() {
    let test_cases = vec![
        ("ERROR", Level::ERROR),
        ("WARN", Level::WARN),
        ("INFO", Level::INFO),
        ("DEBUG", Level::DEBUG),
        ("TRACE", Level::TRACE),
        ("debug", Level::DEBUG),
        (" warn ", Level::WARN),
        ("invalid", Level::INFO),
        ("", Level::INFO),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_level(input), expected, "Failed for input: {input:?}");
    }
}

#[test]
fn test_verbosity_raises_level() {
    assert_eq!(level_for_verbosity(0), None);
    assert_eq!(level_for_verbosity(1), Some(Level::DEBUG));
    assert_eq!(level_for_verbosity(2), Some(Level::TRACE));
    assert_eq!(level_for_verbosity(7), Some(Level::TRACE));
}

#[test]
fn test_init_logging_is_idempotent() {
    init_logging(Level::INFO, LogFormat::Compact, false);
    init_logging(Level::DEBUG, LogFormat::Json, true);

    tracing::info!("logging still works after repeated init");
}

#[test]
fn test_span_macros_create_spans() {
    init_logging(Level::TRACE, LogFormat::Compact, false);

    let span = news_sorter::intake_span!(title = "Go Language");
    let _guard = span.enter();
    let inner = news_sorter::gateway_span!(path = "tasks");
    let _inner_guard = inner.enter();
    tracing::debug!("inside nested spans");
}
