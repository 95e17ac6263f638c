//! Domain identifiers (strongly-typed IDs).
//!
//! すべてのエンティティ ID は ULID ベースの `Id<T>` で表現します。
//! `T` は PhantomData のマーカー型で、`UserId` と `TaskId` のような
//! 異なるリソースの ID をコンパイル時に区別します。
//!
//! ## ワイヤ表現
//! - JSON: プレフィックスなしの ULID 文字列（`"01HZX3K8Q6V2B9D4F7G1H3J5K7"`）
//! - Display: リソース名のプレフィックス付き（`task-01HZX3K8Q6V2B9D4F7G1H3J5K7`）
//! - FromStr: どちらの形式も受け付ける

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "user-", "task-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Failed to parse an id from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {resource}id {input:?}: {reason}")]
pub struct IdParseError {
    pub resource: &'static str,
    pub input: String,
    pub reason: String,
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix(T::prefix()).unwrap_or(trimmed);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|e| IdParseError {
                resource: T::prefix(),
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ulid.serialize(serializer)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ulid::deserialize(deserializer).map(Self::from_ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

macro_rules! id_marker {
    ($marker:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $marker {}

        impl IdMarker for $marker {
            fn prefix() -> &'static str {
                $prefix
            }
        }
    };
}

id_marker!(User, "user-");
id_marker!(Verification, "verification-");
id_marker!(Task, "task-");
id_marker!(Dispute, "dispute-");
id_marker!(Payment, "payment-");
id_marker!(Message, "message-");

pub type UserId = Id<User>;
pub type VerificationId = Id<Verification>;
pub type TaskId = Id<Task>;
pub type DisputeId = Id<Dispute>;
pub type PaymentId = Id<Payment>;
pub type MessageId = Id<Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_resource_prefix() {
        let ulid = Ulid::new();
        assert_eq!(UserId::from_ulid(ulid).to_string(), format!("user-{ulid}"));
        assert_eq!(TaskId::from_ulid(ulid).to_string(), format!("task-{ulid}"));
        assert!(
            VerificationId::from_ulid(ulid)
                .to_string()
                .starts_with("verification-")
        );
    }

    #[test]
    fn serializes_as_bare_ulid_string() {
        let ulid = Ulid::new();
        let task_id = TaskId::from_ulid(ulid);

        let json = serde_json::to_string(&task_id).unwrap();
        assert_eq!(json, format!("\"{ulid}\""));

        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task_id);
    }

    #[test]
    fn parses_with_or_without_prefix() {
        let ulid = Ulid::new();
        let bare: UserId = ulid.to_string().parse().unwrap();
        let prefixed: UserId = format!("user-{ulid}").parse().unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.as_ulid(), ulid);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-an-id".parse::<PaymentId>().unwrap_err();
        assert_eq!(err.resource, "payment-");
        assert_eq!(err.input, "not-an-id");
    }

    #[test]
    fn phantom_marker_is_zero_sized() {
        assert_eq!(std::mem::size_of::<TaskId>(), std::mem::size_of::<Ulid>());
    }
}
