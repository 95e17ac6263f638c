//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryStore**: 開発用のコレクションストア
//!
//! 本番用のストア（PostgreSQL など）は別クレートで `Store` を実装します。

pub mod inmem_store;

pub use self::inmem_store::InMemoryStore;
