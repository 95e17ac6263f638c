//! Errors - ストア操作のエラー
//!
//! QueryPage エンジンと Classifier はエラーを返しません。
//! 外に見える失敗は「レコードが見つからない」などストア側のものだけです。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} {id} already exists")]
    Duplicate { resource: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn duplicate(resource: &'static str, id: impl ToString) -> Self {
        StoreError::Duplicate {
            resource,
            id: id.to_string(),
        }
    }
}
