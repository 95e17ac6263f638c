//! Store port - エンティティコレクションの永続化境界
//!
//! モックデータのグローバル配列の代わりに、このポートを通して
//! コレクションを読み書きします。QueryPage エンジンと Classifier は
//! `list()` が返すスナップショットだけを見ます。
//!
//! # 実装
//! - **InMemoryStore**: 開発・テスト用（`impls::inmem_store`）

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

use crate::domain::StoreError;

/// A record with a stable identity.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// Collection name used in error messages.
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

/// Store は 1 種類のエンティティのコレクションを管理
///
/// # 設計原則
/// - `list()` は挿入順を保ったスナップショットを返す（安定ソートの前提）
/// - id の一意性はストアが保証する（エンジンは検証しない）
/// - 書き込みの直列化はストア実装の責務
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// Snapshot of every record, in insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: T::Id) -> Result<T, StoreError>;

    /// Fails with `Duplicate` if the id is already present.
    async fn insert(&self, record: T) -> Result<(), StoreError>;

    /// Replace the record with the same id; returns the previous version.
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Remove and return the record.
    async fn delete(&self, id: T::Id) -> Result<T, StoreError>;
}
