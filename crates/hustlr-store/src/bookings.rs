//! Booking store.
//!
//! Bookings are created with a caller-supplied initial status (`Upcoming`
//! when a consumer books a listing, `Pending` when a provider applies to a
//! posted job) and then move through the transition allow-list on
//! [`BookingStatus`]. Bookings are never deleted.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use hustlr_shared::{BookingId, BookingStatus, ServiceId, UserId, UserRole};

use crate::error::{Result, StoreError};
use crate::models::Booking;
use crate::notify::{Notice, NoticeQueue};

/// Payload for creating a booking. Names are denormalized snapshots taken
/// by the caller at creation time.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service_id: ServiceId,
    pub service_name: String,
    pub provider_id: UserId,
    pub provider_name: String,
    pub consumer_id: UserId,
    pub consumer_name: String,
    pub price: f64,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub location: Option<String>,
}

/// Derived dashboard figures for one consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumerStats {
    /// All bookings ever made by the consumer.
    pub recent_bookings: u32,
    /// Total price of the consumer's completed bookings.
    pub total_spent: f64,
}

/// Booking arena.
#[derive(Default)]
pub struct BookingStore {
    bookings: HashMap<BookingId, Booking>,
    notices: NoticeQueue,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booking(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.get(&id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Create a booking with a fresh id and the caller-supplied status.
    pub fn create_booking(&mut self, data: NewBooking) -> Result<Booking> {
        let booking = Booking {
            id: BookingId::new(),
            service_id: data.service_id,
            service_name: data.service_name,
            provider_id: data.provider_id,
            provider_name: data.provider_name,
            consumer_id: data.consumer_id,
            consumer_name: data.consumer_name,
            price: data.price,
            date: data.date,
            time: data.time,
            status: data.status,
            notes: data.notes,
            location: data.location,
        };

        info!(
            booking = %booking.id,
            consumer = %booking.consumer_id,
            provider = %booking.provider_id,
            status = booking.status.as_str(),
            "Booking created"
        );
        self.bookings.insert(booking.id, booking.clone());
        self.notices.push(Notice::success("Booking created successfully"));
        Ok(booking)
    }

    /// Move a booking to a new status along the transition allow-list.
    pub fn update_booking_status(&mut self, id: BookingId, status: BookingStatus) -> Result<Booking> {
        let Some(booking) = self.bookings.get_mut(&id) else {
            warn!(booking = %id, "Status update failed: booking not found");
            self.notices.push(Notice::error("Booking not found"));
            return Err(StoreError::BookingNotFound);
        };

        if !booking.status.can_transition_to(status) {
            warn!(
                booking = %id,
                from = booking.status.as_str(),
                to = status.as_str(),
                "Status update rejected"
            );
            self.notices.push(Notice::error(format!(
                "Cannot move booking from '{}' to '{}'",
                booking.status, status
            )));
            return Err(StoreError::InvalidTransition {
                from: booking.status,
                to: status,
            });
        }

        booking.status = status;
        let updated = booking.clone();

        info!(booking = %id, status = status.as_str(), "Booking status updated");
        self.notices.push(Notice::success(match status {
            BookingStatus::Pending => "Booking is now pending approval",
            BookingStatus::Upcoming => "Booking confirmed",
            BookingStatus::Completed => "Booking marked as completed",
            BookingStatus::Canceled => "Booking has been canceled",
        }));
        Ok(updated)
    }

    pub fn get_bookings_by_consumer(&self, consumer_id: UserId) -> Vec<&Booking> {
        self.sorted(|b| b.consumer_id == consumer_id)
    }

    pub fn get_bookings_by_provider(&self, provider_id: UserId) -> Vec<&Booking> {
        self.sorted(|b| b.provider_id == provider_id)
    }

    pub fn get_upcoming_bookings(&self, user_id: UserId, role: UserRole) -> Vec<&Booking> {
        self.by_role_and_status(user_id, role, BookingStatus::Upcoming)
    }

    pub fn get_completed_bookings(&self, user_id: UserId, role: UserRole) -> Vec<&Booking> {
        self.by_role_and_status(user_id, role, BookingStatus::Completed)
    }

    pub fn get_canceled_bookings(&self, user_id: UserId, role: UserRole) -> Vec<&Booking> {
        self.by_role_and_status(user_id, role, BookingStatus::Canceled)
    }

    /// Job applications awaiting the provider's response.
    pub fn get_pending_bookings(&self, provider_id: UserId) -> Vec<&Booking> {
        self.sorted(|b| b.provider_id == provider_id && b.status == BookingStatus::Pending)
    }

    /// Dashboard figures for one consumer.
    pub fn consumer_stats(&self, consumer_id: UserId) -> ConsumerStats {
        let mut stats = ConsumerStats {
            recent_bookings: 0,
            total_spent: 0.0,
        };
        for booking in self.bookings.values() {
            if booking.consumer_id != consumer_id {
                continue;
            }
            stats.recent_bookings += 1;
            if booking.status == BookingStatus::Completed {
                stats.total_spent += booking.price;
            }
        }
        stats
    }

    /// Remove and return pending toast notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Used by seeding to register fixtures without toast noise.
    pub(crate) fn insert_seed_booking(&mut self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
    }

    fn by_role_and_status(
        &self,
        user_id: UserId,
        role: UserRole,
        status: BookingStatus,
    ) -> Vec<&Booking> {
        self.sorted(|b| {
            let id_matches = match role {
                UserRole::Consumer => b.consumer_id == user_id,
                UserRole::Business => b.provider_id == user_id,
            };
            id_matches && b.status == status
        })
    }

    fn sorted(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<&Booking> {
        let mut results: Vec<&Booking> = self
            .bookings
            .values()
            .filter(|b| predicate(b))
            .collect();
        results.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_for(
        consumer_id: UserId,
        provider_id: UserId,
        status: BookingStatus,
        price: f64,
    ) -> NewBooking {
        NewBooking {
            service_id: ServiceId::new(),
            service_name: "House Painting".to_string(),
            provider_id,
            provider_name: "John's Paintin'".to_string(),
            consumer_id,
            consumer_name: "Sandra East".to_string(),
            price,
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            time: "09:00 AM".to_string(),
            status,
            notes: None,
            location: Some("123 Main St".to_string()),
        }
    }

    #[test]
    fn role_and_status_queries_return_exact_subsets() {
        let mut store = BookingStore::new();
        let consumer = UserId::new();
        let other_consumer = UserId::new();
        let provider = UserId::new();

        store.create_booking(booking_for(consumer, provider, BookingStatus::Upcoming, 120.0)).unwrap();
        store.create_booking(booking_for(consumer, provider, BookingStatus::Completed, 95.0)).unwrap();
        store.create_booking(booking_for(other_consumer, provider, BookingStatus::Upcoming, 200.0)).unwrap();

        let upcoming = store.get_upcoming_bookings(consumer, UserRole::Consumer);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].consumer_id, consumer);

        // Bookings belonging to someone else never leak into this set.
        store.create_booking(booking_for(other_consumer, provider, BookingStatus::Upcoming, 50.0)).unwrap();
        assert_eq!(store.get_upcoming_bookings(consumer, UserRole::Consumer).len(), 1);

        assert_eq!(store.get_upcoming_bookings(provider, UserRole::Business).len(), 3);
        assert_eq!(store.get_completed_bookings(consumer, UserRole::Consumer).len(), 1);
        assert!(store.get_canceled_bookings(consumer, UserRole::Consumer).is_empty());
    }

    #[test]
    fn pending_queue_is_provider_scoped() {
        let mut store = BookingStore::new();
        let provider = UserId::new();
        let other_provider = UserId::new();

        store.create_booking(booking_for(UserId::new(), provider, BookingStatus::Pending, 300.0)).unwrap();
        store.create_booking(booking_for(UserId::new(), other_provider, BookingStatus::Pending, 80.0)).unwrap();

        let pending = store.get_pending_bookings(provider);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].provider_id, provider);
    }

    #[test]
    fn legal_lifecycle_progresses() {
        let mut store = BookingStore::new();
        let booking = store
            .create_booking(booking_for(UserId::new(), UserId::new(), BookingStatus::Pending, 300.0))
            .unwrap();

        let booking = store.update_booking_status(booking.id, BookingStatus::Upcoming).unwrap();
        assert_eq!(booking.status, BookingStatus::Upcoming);

        let booking = store.update_booking_status(booking.id, BookingStatus::Completed).unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn illegal_transition_leaves_status_untouched() {
        let mut store = BookingStore::new();
        let booking = store
            .create_booking(booking_for(UserId::new(), UserId::new(), BookingStatus::Completed, 95.0))
            .unwrap();

        let err = store
            .update_booking_status(booking.id, BookingStatus::Upcoming)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransition {
                from: BookingStatus::Completed,
                to: BookingStatus::Upcoming,
            }
        ));
        assert_eq!(store.booking(booking.id).unwrap().status, BookingStatus::Completed);
    }

    #[test]
    fn unknown_booking_is_reported() {
        let mut store = BookingStore::new();
        assert!(matches!(
            store.update_booking_status(BookingId::new(), BookingStatus::Canceled),
            Err(StoreError::BookingNotFound)
        ));
    }

    #[test]
    fn consumer_stats_count_all_and_sum_completed() {
        let mut store = BookingStore::new();
        let consumer = UserId::new();
        let provider = UserId::new();

        store.create_booking(booking_for(consumer, provider, BookingStatus::Completed, 95.0)).unwrap();
        store.create_booking(booking_for(consumer, provider, BookingStatus::Completed, 30.0)).unwrap();
        store.create_booking(booking_for(consumer, provider, BookingStatus::Upcoming, 500.0)).unwrap();

        let stats = store.consumer_stats(consumer);
        assert_eq!(stats.recent_bookings, 3);
        assert_eq!(stats.total_spent, 125.0);
    }
}
