//! Domain model: typed ids, marketplace entities, task lifecycle, errors.

/// Fieldless enum with SCREAMING_SNAKE_CASE wire names and `as_str()`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod dispute;
pub mod errors;
pub mod ids;
pub mod message;
pub mod payment;
pub mod state;
pub mod task;
pub mod timestamp;
pub mod user;
pub mod verification;

pub use dispute::{Dispute, DisputeStatus};
pub use errors::StoreError;
pub use ids::{
    DisputeId, Id, IdMarker, IdParseError, MessageId, PaymentId, TaskId, UserId, VerificationId,
};
pub use message::Message;
pub use payment::{Payment, PaymentStatus};
pub use state::{TaskStatus, UnknownStatus};
pub use task::Task;
pub use user::{User, UserRole};
pub use verification::{Verification, VerificationStatus};
