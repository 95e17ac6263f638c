//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 指定されなかったポートは開発用実装で埋める

use std::sync::Arc;

use crate::app::App;
use crate::config::{Settings, SettingsError};
use crate::domain::{Dispute, Message, Payment, Task, User, Verification};
use crate::impls::InMemoryStore;
use crate::ports::{Clock, Store, SystemClock};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .with_settings(Settings::load(None)?)
///     .with_tasks(InMemoryStore::with_records(tasks)?)
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - build() 時に Settings を検証
/// - 不正な値があれば BuildError を返す（リクエスト処理中には失敗しない）
pub struct AppBuilder {
    users: Option<Arc<dyn Store<User>>>,
    verifications: Option<Arc<dyn Store<Verification>>>,
    tasks: Option<Arc<dyn Store<Task>>>,
    disputes: Option<Arc<dyn Store<Dispute>>>,
    payments: Option<Arc<dyn Store<Payment>>>,
    messages: Option<Arc<dyn Store<Message>>>,
    clock: Option<Arc<dyn Clock>>,
    settings: Settings,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            users: None,
            verifications: None,
            tasks: None,
            disputes: None,
            payments: None,
            messages: None,
            clock: None,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Defaults to [`SystemClock`].
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_users(mut self, store: impl Store<User> + 'static) -> Self {
        self.users = Some(Arc::new(store));
        self
    }

    pub fn with_verifications(mut self, store: impl Store<Verification> + 'static) -> Self {
        self.verifications = Some(Arc::new(store));
        self
    }

    pub fn with_tasks(mut self, store: impl Store<Task> + 'static) -> Self {
        self.tasks = Some(Arc::new(store));
        self
    }

    pub fn with_disputes(mut self, store: impl Store<Dispute> + 'static) -> Self {
        self.disputes = Some(Arc::new(store));
        self
    }

    pub fn with_payments(mut self, store: impl Store<Payment> + 'static) -> Self {
        self.payments = Some(Arc::new(store));
        self
    }

    pub fn with_messages(mut self, store: impl Store<Message> + 'static) -> Self {
        self.messages = Some(Arc::new(store));
        self
    }

    /// AppBuilder を構築して App を生成
    ///
    /// # 検証
    /// - Settings::validate() を通らなければ BuildError::InvalidSettings
    /// - 指定されていないストアは空の InMemoryStore
    pub fn build(self) -> Result<App, BuildError> {
        self.settings.validate()?;

        tracing::debug!(
            default_page_size = self.settings.default_page_size,
            due_soon_hours = self.settings.due_soon_hours,
            overdue_counting = ?self.settings.overdue_counting,
            "app built"
        );

        Ok(App {
            users: self.users.unwrap_or_else(empty_store),
            verifications: self.verifications.unwrap_or_else(empty_store),
            tasks: self.tasks.unwrap_or_else(empty_store),
            disputes: self.disputes.unwrap_or_else(empty_store),
            payments: self.payments.unwrap_or_else(empty_store),
            messages: self.messages.unwrap_or_else(empty_store),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            settings: self.settings,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_store<T: crate::ports::Record>() -> Arc<dyn Store<T>> {
    Arc::new(InMemoryStore::<T>::new())
}
