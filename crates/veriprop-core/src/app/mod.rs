//! App - アプリケーション層
//!
//! ports を組み合わせて、リスト API と統計 API を提供します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: ストア・時計・設定のワイヤリングと起動時検証
//! - **App**: `list_*` と `task_stats`

pub mod builder;
pub mod service;

pub use self::builder::{AppBuilder, BuildError};
pub use self::service::App;
