//! Canonical title labels
//!
//! A title becomes a label by trimming it and collapsing each internal
//! whitespace run into a single hyphen. Two titles with the same label are the
//! same logical task.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a free-text title into its label form (pure function)
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Canonical label derived from a task title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleLabel(String);

impl TitleLabel {
    pub fn from_title(title: &str) -> Self {
        Self(normalize_title(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-only titles produce an empty label
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TitleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TitleLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
