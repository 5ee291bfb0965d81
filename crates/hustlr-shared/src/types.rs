use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a user in the roster.
    UserId
);
entity_id!(
    /// Identifies a service listing.
    ServiceId
);
entity_id!(
    /// Identifies a review attached to a listing.
    ReviewId
);
entity_id!(
    /// Identifies a booking.
    BookingId
);
entity_id!(
    /// Identifies a conversation thread.
    ConversationId
);
entity_id!(
    /// Identifies a single chat message.
    MessageId
);

/// Which side of the marketplace a user is on.
///
/// The role is fixed at signup and never changes afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Consumer,
    Business,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Consumer => "consumer",
            UserRole::Business => "business",
        }
    }
}

/// Lifecycle state of a booking.
///
/// A provider's response to a job application moves `Pending` forward;
/// either party can cancel before completion. `Completed` and `Canceled`
/// are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Upcoming,
    Completed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Completed => "completed",
            BookingStatus::Canceled => "canceled",
        }
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Allowed: pending -> upcoming | canceled, upcoming -> completed |
    /// canceled. Terminal states and self-transitions are rejected.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Upcoming) | (Pending, Canceled) | (Upcoming, Completed) | (Upcoming, Canceled)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a listing's price is quoted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Hour,
    Job,
}

/// The fixed set of service categories offered on the marketplace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Painting,
    Cleaning,
    Plumbing,
    Electrical,
    Repair,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 5] = [
        ServiceCategory::Painting,
        ServiceCategory::Cleaning,
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Repair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Painting => "painting",
            ServiceCategory::Cleaning => "cleaning",
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Repair => "repair",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
