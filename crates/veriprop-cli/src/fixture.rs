//! Fixture - JSON で持ち運ぶ全コレクションのスナップショット

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use veriprop_core::app::{App, AppBuilder};
use veriprop_core::config::Settings;
use veriprop_core::domain::{Dispute, Message, Payment, Task, User, Verification};
use veriprop_core::impls::InMemoryStore;
use veriprop_core::ports::Clock;

/// Missing collections load as empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<User>,
    pub verifications: Vec<Verification>,
    pub tasks: Vec<Task>,
    pub disputes: Vec<Dispute>,
    pub payments: Vec<Payment>,
    pub messages: Vec<Message>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let fixture: Fixture =
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            users = fixture.users.len(),
            tasks = fixture.tasks.len(),
            "fixture loaded"
        );
        Ok(fixture)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing fixture")
    }

    /// Seed one in-memory store per collection and build the app.
    pub fn into_app(self, settings: Settings, clock: Arc<dyn Clock>) -> Result<App> {
        let app = AppBuilder::new()
            .with_settings(settings)
            .with_clock(clock)
            .with_users(InMemoryStore::with_records(self.users)?)
            .with_verifications(InMemoryStore::with_records(self.verifications)?)
            .with_tasks(InMemoryStore::with_records(self.tasks)?)
            .with_disputes(InMemoryStore::with_records(self.disputes)?)
            .with_payments(InMemoryStore::with_records(self.payments)?)
            .with_messages(InMemoryStore::with_records(self.messages)?)
            .build()?;
        Ok(app)
    }
}
