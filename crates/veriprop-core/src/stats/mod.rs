//! Stats - タスク統計

pub mod classifier;

pub use self::classifier::{DEFAULT_DUE_SOON_HOURS, OverdueCounting, TaskClassifier, TaskStats};
