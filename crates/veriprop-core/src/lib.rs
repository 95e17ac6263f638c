//! veriprop-core
//!
//! Query and statistics core for the property verification marketplace.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, entities, state, timestamp, errors）
//! - **ports**: 抽象化レイヤー（Store, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryStore）
//! - **query**: QueryPage エンジン（params → filter → sort → page）
//! - **stats**: タスクのライフサイクル統計（TaskClassifier）
//! - **app**: アプリケーションロジック（AppBuilder, App）
//! - **config**: 設定の読み込み（defaults → TOML → env）
//! - **observability**: tracing の初期化

pub mod domain;
pub mod ports;
pub mod impls;
pub mod query;
pub mod stats;
pub mod app;
pub mod config;
pub mod observability;
