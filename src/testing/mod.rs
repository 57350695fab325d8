//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for exercising the intake
//! pipeline without a remote task service or real web pages.

pub mod mocks;

pub use mocks::*;
