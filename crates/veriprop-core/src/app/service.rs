//! App - リスト API と統計 API
//!
//! # 処理の流れ
//! - list: RawQuery を正規化 → ストアのスナップショット → QueryPage エンジン
//! - stats: 担当 verifier で絞り込み → now を 1 回だけ読む → Classifier

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{Dispute, Message, Payment, StoreError, Task, User, UserId, Verification};
use crate::ports::{Clock, Record, Store};
use crate::query::{Listable, Page, RawQuery, list_page};
use crate::stats::TaskStats;

/// App はストア群・時計・設定をまとめたアプリケーション本体
///
/// AppBuilder から生成します。
pub struct App {
    pub(super) users: Arc<dyn Store<User>>,
    pub(super) verifications: Arc<dyn Store<Verification>>,
    pub(super) tasks: Arc<dyn Store<Task>>,
    pub(super) disputes: Arc<dyn Store<Dispute>>,
    pub(super) payments: Arc<dyn Store<Payment>>,
    pub(super) messages: Arc<dyn Store<Message>>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) settings: Settings,
}

impl App {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn users(&self) -> &dyn Store<User> {
        self.users.as_ref()
    }

    pub fn verifications(&self) -> &dyn Store<Verification> {
        self.verifications.as_ref()
    }

    pub fn tasks(&self) -> &dyn Store<Task> {
        self.tasks.as_ref()
    }

    pub fn disputes(&self) -> &dyn Store<Dispute> {
        self.disputes.as_ref()
    }

    pub fn payments(&self) -> &dyn Store<Payment> {
        self.payments.as_ref()
    }

    pub fn messages(&self) -> &dyn Store<Message> {
        self.messages.as_ref()
    }

    pub async fn list_users(&self, raw: &RawQuery) -> Result<Page<User>, StoreError> {
        self.list(self.users(), raw).await
    }

    pub async fn list_verifications(&self, raw: &RawQuery) -> Result<Page<Verification>, StoreError> {
        self.list(self.verifications(), raw).await
    }

    pub async fn list_tasks(&self, raw: &RawQuery) -> Result<Page<Task>, StoreError> {
        self.list(self.tasks(), raw).await
    }

    pub async fn list_disputes(&self, raw: &RawQuery) -> Result<Page<Dispute>, StoreError> {
        self.list(self.disputes(), raw).await
    }

    pub async fn list_payments(&self, raw: &RawQuery) -> Result<Page<Payment>, StoreError> {
        self.list(self.payments(), raw).await
    }

    pub async fn list_messages(&self, raw: &RawQuery) -> Result<Page<Message>, StoreError> {
        self.list(self.messages(), raw).await
    }

    async fn list<T>(&self, store: &dyn Store<T>, raw: &RawQuery) -> Result<Page<T>, StoreError>
    where
        T: Record + Listable,
    {
        let params = raw.normalize(self.settings.default_page_size);
        let snapshot = store.list().await?;
        Ok(list_page(&snapshot, &params))
    }

    /// Lifecycle stats for the tasks owned by `verifier_id`.
    ///
    /// An unknown verifier simply owns no tasks.
    pub async fn task_stats(&self, verifier_id: UserId) -> Result<TaskStats, StoreError> {
        let tasks = self.tasks.list().await?;
        let now = self.clock.now();
        let owned = tasks.iter().filter(|t| t.verifier_id == verifier_id);
        let stats = self.settings.classifier().classify(owned, now);

        tracing::debug!(
            %verifier_id,
            %now,
            assigned = stats.assigned,
            in_progress = stats.in_progress,
            submitted = stats.submitted,
            overdue = stats.overdue,
            due_soon = stats.due_soon,
            "task stats"
        );
        Ok(stats)
    }
}
