//! TaskClassifier - タスクのライフサイクル統計
//!
//! 1 人の verifier に絞り込まれたタスク集合から `TaskStats` を導出します。
//!
//! # 設計原則
//! - 純粋関数: タスクを書き換えない。I/O なし
//! - "now" は呼び出しごとに 1 回だけ外から渡す
//! - 壊れた日付・欠けた日付は「該当しない」として扱い、エラーにしない
//!
//! # 判定ステップ（各タスクで全ステップを実行）
//! 1. 現在の status でバケットに振り分け
//! 2. COMPLETED かつ両日付あり: `date_due - date_assigned` を解決時間として加算（正の値のみ）
//! 3. COMPLETED/OVERDUE 以外で期限が `(0, window]` 内: `due_soon`
//! 4. COMPLETED 以外で期限切れ: `overdue`（ステップ 1 と重複しうる）
//! 5. 平均解決時間を小数第 2 位で丸める

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskStatus};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

pub const DEFAULT_DUE_SOON_HOURS: u32 = 24;

/// Lifecycle counts for one verifier's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    /// ASSIGNED and ACCEPTED.
    pub assigned: usize,
    pub in_progress: usize,
    pub submitted: usize,
    pub overdue: usize,
    pub due_soon: usize,
    #[serde(rename = "avg_resolution__hours")]
    pub avg_resolution_hours: f64,
}

/// How a task with status OVERDUE and a past due date is counted.
///
/// The status pass and the due-date pass both add to `overdue`.
/// `Cumulative` keeps both increments, so such a task counts twice.
/// `Distinct` counts every task at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdueCounting {
    #[default]
    Cumulative,
    Distinct,
}

/// Stateless classifier; cheap to build per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskClassifier {
    due_soon_window: Duration,
    overdue_counting: OverdueCounting,
}

impl Default for TaskClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DUE_SOON_HOURS, OverdueCounting::default())
    }
}

impl TaskClassifier {
    pub fn new(due_soon_hours: u32, overdue_counting: OverdueCounting) -> Self {
        Self {
            due_soon_window: Duration::hours(i64::from(due_soon_hours)),
            overdue_counting,
        }
    }

    pub fn due_soon_window(&self) -> Duration {
        self.due_soon_window
    }

    pub fn overdue_counting(&self) -> OverdueCounting {
        self.overdue_counting
    }

    pub fn classify<'a, I>(&self, tasks: I, now: DateTime<Utc>) -> TaskStats
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut stats = TaskStats::default();
        let mut resolution_total = 0.0_f64;
        let mut resolved = 0_usize;

        for task in tasks {
            match task.status {
                TaskStatus::Assigned | TaskStatus::Accepted => stats.assigned += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Submitted => stats.submitted += 1,
                TaskStatus::Overdue => stats.overdue += 1,
                TaskStatus::Completed => {}
            }

            if task.status == TaskStatus::Completed
                && let Some(hours) = resolution_hours(task)
                && hours > 0.0
            {
                resolution_total += hours;
                resolved += 1;
            }

            let Some(due) = task.date_due else {
                continue;
            };

            if !matches!(task.status, TaskStatus::Completed | TaskStatus::Overdue) {
                let until_due = due - now;
                if until_due > Duration::zero() && until_due <= self.due_soon_window {
                    stats.due_soon += 1;
                }
            }

            if task.status != TaskStatus::Completed && due < now && self.counts_past_due(task) {
                stats.overdue += 1;
            }
        }

        if resolved > 0 {
            stats.avg_resolution_hours = round2(resolution_total / resolved as f64);
        }
        stats
    }

    fn counts_past_due(&self, task: &Task) -> bool {
        match self.overdue_counting {
            OverdueCounting::Cumulative => true,
            OverdueCounting::Distinct => task.status != TaskStatus::Overdue,
        }
    }
}

fn resolution_hours(task: &Task) -> Option<f64> {
    let assigned = task.date_assigned?;
    let due = task.date_due?;
    Some((due - assigned).num_milliseconds() as f64 / MILLIS_PER_HOUR)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
