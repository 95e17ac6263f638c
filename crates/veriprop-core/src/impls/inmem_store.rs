//! InMemoryStore - 開発用のコレクションストア
//!
//! # 実装詳細
//! - `Vec<T>` で挿入順を保持（リスト系エンドポイントの安定ソートの前提）
//! - tokio の RwLock で書き込みを直列化
//! - `list()` はクローンしたスナップショットを返す

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::StoreError;
use crate::ports::{Record, Store};

/// In-memory implementation of [`Store`].
///
/// Cloning the store shares the same underlying collection.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Record> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with `records`, rejecting duplicate ids.
    pub fn with_records(records: Vec<T>) -> Result<Self, StoreError> {
        for (i, record) in records.iter().enumerate() {
            let id = record.id();
            if records[..i].iter().any(|r| r.id() == id) {
                return Err(StoreError::duplicate(T::COLLECTION, id));
            }
        }
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn position<T: Record>(records: &[T], id: T::Id) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

#[async_trait]
impl<T: Record> Store<T> for InMemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: T::Id) -> Result<T, StoreError> {
        let records = self.records.read().await;
        position(&records, id)
            .map(|i| records[i].clone())
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
    }

    async fn insert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let id = record.id();
        if position(&records, id).is_some() {
            return Err(StoreError::duplicate(T::COLLECTION, id));
        }
        records.push(record);
        tracing::debug!(collection = T::COLLECTION, %id, "inserted");
        Ok(())
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let id = record.id();
        let i = position(&records, id).ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
        let previous = std::mem::replace(&mut records[i], record);
        tracing::debug!(collection = T::COLLECTION, %id, "updated");
        Ok(previous)
    }

    async fn delete(&self, id: T::Id) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let i = position(&records, id).ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
        let removed = records.remove(i);
        tracing::debug!(collection = T::COLLECTION, %id, "deleted");
        Ok(removed)
    }
}
