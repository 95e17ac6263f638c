use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{UserId, VerificationId};
use crate::ports::Record;
use crate::query::Listable;

wire_enum! {
    VerificationStatus {
        Pending => "PENDING",
        InReview => "IN_REVIEW",
        Verified => "VERIFIED",
        Rejected => "REJECTED",
    }
}

/// A client's request to have a property verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub id: VerificationId,
    pub title: String,
    pub property_address: String,
    pub client_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_id: Option<UserId>,

    pub status: VerificationStatus,
    pub date_created: DateTime<Utc>,
}

impl Verification {
    pub fn new(
        id: VerificationId,
        title: impl Into<String>,
        property_address: impl Into<String>,
        client_id: UserId,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            property_address: property_address.into(),
            client_id,
            verifier_id: None,
            status: VerificationStatus::Pending,
            date_created,
        }
    }

    pub fn with_status(mut self, status: VerificationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn assigned_to(mut self, verifier_id: UserId) -> Self {
        self.verifier_id = Some(verifier_id);
        self
    }
}

impl Record for Verification {
    type Id = VerificationId;
    const COLLECTION: &'static str = "verifications";

    fn id(&self) -> VerificationId {
        self.id
    }
}

impl Listable for Verification {
    const RESOURCE: &'static str = "verifications";
    const FILTER_KEYS: &'static [&'static str] = &["client_id", "verifier_id"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.property_address.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "client_id" => Some(self.client_id.as_ulid().to_string()),
            "verifier_id" => self.verifier_id.map(|id| id.as_ulid().to_string()),
            _ => None,
        }
    }

    fn date_created(&self) -> Option<DateTime<Utc>> {
        Some(self.date_created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryParams, list_page};
    use chrono::TimeZone;
    use ulid::Ulid;

    fn verification(title: &str, address: &str, client: UserId, day: u32) -> Verification {
        Verification {
            id: VerificationId::from_ulid(Ulid::new()),
            title: title.to_string(),
            property_address: address.to_string(),
            client_id: client,
            verifier_id: None,
            status: VerificationStatus::Pending,
            date_created: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn searches_address_and_filters_by_client() {
        let alice = UserId::from_ulid(Ulid::new());
        let bob = UserId::from_ulid(Ulid::new());
        let rows = vec![
            verification("Condo", "12 Harbour St", alice, 1),
            verification("Farmhouse", "4 Harbour Rd", bob, 2),
            verification("Loft", "9 Mill Lane", alice, 3),
        ];

        let params = QueryParams::new().with_query("harbour");
        assert_eq!(list_page(&rows, &params).total, 2);

        let params = params.with_filter("client_id", alice.as_ulid().to_string());
        let page = list_page(&rows, &params);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Condo");
    }

    #[test]
    fn unassigned_verification_never_matches_verifier_filter() {
        let client = UserId::from_ulid(Ulid::new());
        let rows = vec![verification("Condo", "12 Harbour St", client, 1)];
        let params = QueryParams::new().with_filter("verifier_id", Ulid::new().to_string());
        assert_eq!(list_page(&rows, &params).total, 0);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_value(VerificationStatus::InReview).unwrap(),
            "IN_REVIEW"
        );
    }
}
