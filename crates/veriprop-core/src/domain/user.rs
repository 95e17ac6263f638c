use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::ports::Record;
use crate::query::Listable;

wire_enum! {
    /// Marketplace role. The `status` filter on users matches against it.
    UserRole {
        Admin => "ADMIN",
        Client => "CLIENT",
        Verifier => "VERIFIER",
    }
}

/// A marketplace account.
///
/// Users carry no creation timestamp, so listings keep store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

impl Record for User {
    type Id = UserId;
    const COLLECTION: &'static str = "users";

    fn id(&self) -> UserId {
        self.id
    }
}

impl Listable for User {
    const RESOURCE: &'static str = "users";

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.role.as_str())
    }
}
