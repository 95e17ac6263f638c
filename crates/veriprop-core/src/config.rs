//! Settings - 実行時設定
//!
//! # 読み込み順（後勝ち）
//! 1. 組み込みのデフォルト値
//! 2. TOML ファイル（指定された場合のみ）
//! 3. 環境変数 `VERIPROP__DEFAULT_PAGE_SIZE` など
//!
//! 読み込み後に `validate()` で値域を検査します。

use std::path::Path;

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::DEFAULT_PAGE_SIZE;
use crate::stats::{DEFAULT_DUE_SOON_HOURS, OverdueCounting, TaskClassifier};

pub const ENV_PREFIX: &str = "VERIPROP";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page size used when a request does not supply one.
    pub default_page_size: usize,
    pub due_soon_hours: u32,
    pub overdue_counting: OverdueCounting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            due_soon_hours: DEFAULT_DUE_SOON_HOURS,
            overdue_counting: OverdueCounting::default(),
        }
    }
}

impl Settings {
    /// Defaults, then `path` (if any), then `VERIPROP__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("default_page_size", defaults.default_page_size as u64)?
            .set_default("due_soon_hours", u64::from(defaults.due_soon_hours))?
            .set_default("overdue_counting", "cumulative")?;

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_page_size < 1 {
            return Err(SettingsError::Invalid {
                key: "default_page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.due_soon_hours < 1 {
            return Err(SettingsError::Invalid {
                key: "due_soon_hours",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn classifier(&self) -> TaskClassifier {
        TaskClassifier::new(self.due_soon_hours, self.overdue_counting)
    }
}
