//! Task lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a verification task.
///
/// State transitions (owned by the task workflow, observed here):
/// - Assigned -> Accepted -> InProgress -> Submitted -> Completed
/// - any non-terminal state -> Overdue (time based)
/// - Overdue -> Submitted | Completed (late delivery)
///
/// Serialized as SCREAMING_SNAKE_CASE: `ASSIGNED`, `IN_PROGRESS`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Assigned,
    Accepted,
    InProgress,
    Submitted,
    Overdue,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::Assigned,
        TaskStatus::Accepted,
        TaskStatus::InProgress,
        TaskStatus::Submitted,
        TaskStatus::Overdue,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Assigned => "ASSIGNED",
            TaskStatus::Accepted => "ACCEPTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Submitted => "SUBMITTED",
            TaskStatus::Overdue => "OVERDUE",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Whether the workflow may move a task from `self` to `next`.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match (self, next) {
            (Assigned, Accepted)
            | (Accepted, InProgress)
            | (InProgress, Submitted)
            | (Submitted, Completed) => true,
            (Overdue, Submitted) | (Overdue, Completed) => true,
            (from, Overdue) => !from.is_terminal() && from != Overdue,
            _ => false,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn serializes_as_screaming_snake_case() {
        let s = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(s, "\"IN_PROGRESS\"");
        let back: TaskStatus = serde_json::from_str("\"OVERDUE\"").unwrap();
        assert_eq!(back, TaskStatus::Overdue);
    }

    #[test]
    fn as_str_matches_serde_name() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(" Completed ".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn only_completed_is_terminal() {
        let terminal: Vec<_> = TaskStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![TaskStatus::Completed]);
    }

    #[rstest]
    #[case::accept(TaskStatus::Assigned, TaskStatus::Accepted, true)]
    #[case::start(TaskStatus::Accepted, TaskStatus::InProgress, true)]
    #[case::submit(TaskStatus::InProgress, TaskStatus::Submitted, true)]
    #[case::complete(TaskStatus::Submitted, TaskStatus::Completed, true)]
    #[case::skip_ahead(TaskStatus::Assigned, TaskStatus::Completed, false)]
    #[case::backwards(TaskStatus::Submitted, TaskStatus::InProgress, false)]
    #[case::late_from_assigned(TaskStatus::Assigned, TaskStatus::Overdue, true)]
    #[case::late_from_submitted(TaskStatus::Submitted, TaskStatus::Overdue, true)]
    #[case::late_delivery(TaskStatus::Overdue, TaskStatus::Completed, true)]
    #[case::overdue_again(TaskStatus::Overdue, TaskStatus::Overdue, false)]
    #[case::completed_is_final(TaskStatus::Completed, TaskStatus::Overdue, false)]
    fn transitions(#[case] from: TaskStatus, #[case] to: TaskStatus, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }
}
