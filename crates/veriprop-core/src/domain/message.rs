use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MessageId, UserId};
use crate::ports::Record;
use crate::query::Listable;

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,

    #[serde(default)]
    pub subject: String,

    pub body: String,

    #[serde(default)]
    pub read: bool,

    pub date_created: DateTime<Utc>,
}

impl Message {
    /// An unread message with no subject.
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        recipient_id: UserId,
        body: impl Into<String>,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
            subject: String::new(),
            body: body.into(),
            read: false,
            date_created,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }
}

impl Record for Message {
    type Id = MessageId;
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> MessageId {
        self.id
    }
}

impl Listable for Message {
    const RESOURCE: &'static str = "messages";
    const FILTER_KEYS: &'static [&'static str] = &["sender_id", "recipient_id"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.subject.as_str(), self.body.as_str()]
    }

    /// `READ` / `UNREAD`.
    fn status(&self) -> Option<&str> {
        Some(if self.read { "READ" } else { "UNREAD" })
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "sender_id" => Some(self.sender_id.as_ulid().to_string()),
            "recipient_id" => Some(self.recipient_id.as_ulid().to_string()),
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
    use chrono::{Duration, TimeZone};
    use ulid::Ulid;

    #[test]
    fn inbox_unread_filter() {
        let me = UserId::from_ulid(Ulid::new());
        let other = UserId::from_ulid(Ulid::new());
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let msg = |to: UserId, read: bool, mins: i64, body: &str| Message {
            id: MessageId::from_ulid(Ulid::new()),
            sender_id: other,
            recipient_id: to,
            subject: String::new(),
            body: body.to_string(),
            read,
            date_created: base + Duration::minutes(mins),
        };
        let messages = vec![
            msg(me, false, 1, "first"),
            msg(me, true, 2, "second"),
            msg(other, false, 3, "not mine"),
            msg(me, false, 4, "third"),
        ];

        let params = QueryParams::new()
            .with_status("unread")
            .with_filter("recipient_id", me.as_ulid().to_string());
        let page = list_page(&messages, &params);
        let bodies: Vec<_> = page.items.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["third", "first"]);
    }
}
