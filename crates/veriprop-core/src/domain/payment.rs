use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PaymentId, UserId};
use crate::ports::Record;
use crate::query::Listable;

wire_enum! {
    PaymentStatus {
        Pending => "PENDING",
        Completed => "COMPLETED",
        Failed => "FAILED",
        Refunded => "REFUNDED",
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Money moving between a client and a verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub description: String,

    /// Minor units (cents).
    pub amount_cents: i64,

    #[serde(default = "default_currency")]
    pub currency: String,

    pub payer_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<UserId>,

    pub status: PaymentStatus,
    pub date_created: DateTime<Utc>,
}

impl Payment {
    /// A pending payment in the default currency.
    pub fn new(
        id: PaymentId,
        description: impl Into<String>,
        amount_cents: i64,
        payer_id: UserId,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount_cents,
            currency: default_currency(),
            payer_id,
            payee_id: None,
            status: PaymentStatus::Pending,
            date_created,
        }
    }

    pub fn with_payee(mut self, payee_id: UserId) -> Self {
        self.payee_id = Some(payee_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }
}

impl Record for Payment {
    type Id = PaymentId;
    const COLLECTION: &'static str = "payments";

    fn id(&self) -> PaymentId {
        self.id
    }
}

impl Listable for Payment {
    const RESOURCE: &'static str = "payments";
    const FILTER_KEYS: &'static [&'static str] = &["payer_id", "payee_id"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "payer_id" => Some(self.payer_id.as_ulid().to_string()),
            "payee_id" => self.payee_id.map(|id| id.as_ulid().to_string()),
            _ => None,
        }
    }

    fn date_created(&self) -> Option<DateTime<Utc>> {
        Some(self.date_created)
    }
}
