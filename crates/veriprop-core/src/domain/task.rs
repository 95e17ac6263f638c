use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TaskId, UserId, VerificationId};
use super::state::TaskStatus;
use super::timestamp::lenient;
use crate::ports::Record;
use crate::query::Listable;

/// A unit of field work assigned to one verifier.
///
/// `status` is owned by the task workflow; nothing in this crate mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: TaskStatus,

    /// Owner of the task.
    pub verifier_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_id: Option<VerificationId>,

    #[serde(default, with = "lenient")]
    pub date_assigned: Option<DateTime<Utc>>,

    #[serde(default, with = "lenient")]
    pub date_due: Option<DateTime<Utc>>,

    pub date_created: DateTime<Utc>,
}

impl Task {
    /// A freshly assigned task with no dates besides its creation time.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        verifier_id: UserId,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Assigned,
            verifier_id,
            verification_id: None,
            date_assigned: None,
            date_due: None,
            date_created,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_verification(mut self, verification_id: VerificationId) -> Self {
        self.verification_id = Some(verification_id);
        self
    }

    pub fn with_dates(
        mut self,
        date_assigned: Option<DateTime<Utc>>,
        date_due: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_assigned = date_assigned;
        self.date_due = date_due;
        self
    }
}

impl Record for Task {
    type Id = TaskId;
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> TaskId {
        self.id
    }
}

impl Listable for Task {
    const RESOURCE: &'static str = "tasks";
    const FILTER_KEYS: &'static [&'static str] = &["verifier_id", "verification_id"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "verifier_id" => Some(self.verifier_id.as_ulid().to_string()),
            "verification_id" => self.verification_id.map(|id| id.as_ulid().to_string()),
            _ => None,
        }
    }

    fn date_created(&self) -> Option<DateTime<Utc>> {
        Some(self.date_created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn deserializes_with_malformed_optional_dates() {
        let verifier = Ulid::new();
        let json = serde_json::json!({
            "id": Ulid::new().to_string(),
            "title": "Roof inspection",
            "status": "IN_PROGRESS",
            "verifier_id": verifier.to_string(),
            "date_assigned": "2024-02-30",
            "date_due": "2024-03-01T09:00:00Z",
            "date_created": "2024-02-20T08:00:00Z"
        });

        let task: Task = serde_json::from_value(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.date_assigned.is_none());
        assert!(task.date_due.is_some());
        assert_eq!(task.description, "");
        assert_eq!(task.verifier_id.as_ulid(), verifier);
    }

    #[test]
    fn filter_values_use_bare_ulids() {
        let verifier = UserId::from_ulid(Ulid::new());
        let task = Task::new(TaskId::from_ulid(Ulid::new()), "t", verifier, Utc::now());
        assert_eq!(
            task.filter_value("verifier_id"),
            Some(verifier.as_ulid().to_string())
        );
        assert_eq!(task.filter_value("verification_id"), None);
        assert_eq!(task.filter_value("colour"), None);
    }
}
