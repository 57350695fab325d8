//! Wire types for the Todoist REST v2 API
//!
//! Only the fields the intake pipeline reads are required. Everything else the
//! service returns is optional or defaulted so that additions on the remote
//! side never break deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A Todoist project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_inbox_project: bool,
    #[serde(default)]
    pub view_style: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Project {
    /// Build a project carrying only its identity fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            parent_id: None,
            order: 0,
            is_favorite: false,
            is_inbox_project: false,
            view_style: None,
            url: None,
        }
    }
}

/// A task as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Due date block of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Due {
    pub date: String,
    /// Human-readable form, e.g. "Jan 10"
    #[serde(default, rename = "string")]
    pub text: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Body of a create-task request
///
/// `due_date` is left out of the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: String,
    pub content: String,
    pub description: String,
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Format a date the way task labels carry it (`YYYY-MM-DD`)
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
