//! Domain model structs held in the in-memory stores.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer; cross-references between entities are plain id
//! values, never shared pointers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hustlr_shared::{
    BookingId, BookingStatus, ConversationId, MessageId, PriceType, ReviewId, ServiceCategory,
    ServiceId, UserId, UserRole,
};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A subscription plan attached to a user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub active: bool,
    /// Plan name ("Free", "Basic Weekly", "Pro Weekly", ...).
    pub plan: String,
    pub next_billing_date: Option<NaiveDate>,
    pub started_on: Option<NaiveDate>,
}

impl Subscription {
    /// The inactive plan every new signup starts on.
    pub fn free() -> Self {
        Self {
            active: false,
            plan: "Free".to_string(),
            next_billing_date: None,
            started_on: None,
        }
    }
}

/// Extra profile fields carried only by business users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessProfile {
    pub years_in_business: u32,
    pub description: String,
}

/// An identity record in the roster.
///
/// Passwords are stored in plaintext on purpose: this layer simulates a
/// backend with mock data and makes no security claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across the roster, compared case-insensitively.
    pub email: String,
    pub password: String,
    /// Fixed at signup; never changes.
    pub role: UserRole,
    pub phone: String,
    pub location: String,
    pub average_rating: f64,
    pub review_count: u32,
    pub subscription: Subscription,
    /// Present iff `role` is `Business`.
    pub business: Option<BusinessProfile>,
}

// ---------------------------------------------------------------------------
// Service listing + review
// ---------------------------------------------------------------------------

/// Where a service is offered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceLocation {
    pub city: String,
    pub suburb: String,
    pub postcode: u32,
}

/// A provider's offering in the catalog.
///
/// `rating` and `review_count` are derived: zero at creation, recomputed
/// from the listing's reviews whenever one is added, never set directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_type: PriceType,
    pub image_url: String,
    pub rating: f64,
    pub review_count: u32,
    pub provider_id: UserId,
    pub category: ServiceCategory,
    pub location: ServiceLocation,
}

/// A rating plus comment attached to one listing. Reviews are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    /// Denormalized snapshot of the reviewer's display name.
    pub user_name: String,
    /// 1-5 stars.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// A proposed or scheduled engagement between one consumer and one
/// provider for one listing.
///
/// Service, provider, and consumer names are snapshots taken at creation
/// time; later profile edits do not rewrite existing bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub service_id: ServiceId,
    pub service_name: String,
    pub provider_id: UserId,
    pub provider_name: String,
    pub consumer_id: UserId,
    pub consumer_name: String,
    pub price: f64,
    pub date: NaiveDate,
    /// Display time ("09:00 AM"); the UI treats it as opaque text.
    pub time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub location: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversation + message
// ---------------------------------------------------------------------------

/// A message thread between two or more users.
///
/// A conversation always has at least one message: the initial message is
/// mandatory at creation. Threads are never closed or archived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    /// Membership set; stored as an ordered list, order carries no meaning.
    pub participants: Vec<UserId>,
    pub last_message_text: String,
    pub last_message_at: DateTime<Utc>,
    pub has_unread_messages: bool,
    pub related_to_booking: Option<BookingId>,
}

/// One chat entry. Messages are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}
