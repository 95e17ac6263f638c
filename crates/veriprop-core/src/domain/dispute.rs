use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DisputeId, TaskId, UserId};
use crate::ports::Record;
use crate::query::Listable;

wire_enum! {
    DisputeStatus {
        Open => "OPEN",
        UnderReview => "UNDER_REVIEW",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

/// A disagreement raised against a task's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    pub id: DisputeId,
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub task_id: TaskId,
    pub raised_by: UserId,
    pub status: DisputeStatus,
    pub date_created: DateTime<Utc>,
}

impl Dispute {
    /// A newly opened dispute.
    pub fn new(
        id: DisputeId,
        title: impl Into<String>,
        task_id: TaskId,
        raised_by: UserId,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            task_id,
            raised_by,
            status: DisputeStatus::Open,
            date_created,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: DisputeStatus) -> Self {
        self.status = status;
        self
    }
}

impl Record for Dispute {
    type Id = DisputeId;
    const COLLECTION: &'static str = "disputes";

    fn id(&self) -> DisputeId {
        self.id
    }
}

impl Listable for Dispute {
    const RESOURCE: &'static str = "disputes";
    const FILTER_KEYS: &'static [&'static str] = &["task_id", "raised_by"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "task_id" => Some(self.task_id.as_ulid().to_string()),
            "raised_by" => Some(self.raised_by.as_ulid().to_string()),
            _ => None,
        }
    }

    fn date_created(&self) -> Option<DateTime<Utc>> {
        Some(self.date_created)
    }
}
