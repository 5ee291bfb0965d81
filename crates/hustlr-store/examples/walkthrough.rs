//! End-to-end walk through the marketplace stores: seed, log in, search
//! the catalog, book a listing, and message the provider.
//!
//! Run with `cargo run --example walkthrough` (set `RUST_LOG` for more).

use tracing_subscriber::{fmt, EnvFilter};

use hustlr_shared::helpers::{ListingFilter, ListingSort};
use hustlr_shared::{BookingStatus, ServiceCategory, UserRole};
use hustlr_store::bookings::NewBooking;
use hustlr_store::{MarketState, StoreConfig};

fn main() -> hustlr_store::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hustlr_store=debug,info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = StoreConfig {
        data_dir: Some(std::env::temp_dir().join("hustlr-walkthrough")),
        seed: true,
        seed_per_category: 5,
    };

    let (mut state, _seeded) = MarketState::new(&config)?;

    let consumer = state.identity.login("consumer@example.com", "password")?;

    // Browse painting services, cheapest first.
    let filter = ListingFilter {
        category: Some(ServiceCategory::Painting),
        ..ListingFilter::default()
    };
    let results = state.listings.search(&filter, Some(ListingSort::PriceAsc));
    println!("{} painting services on offer", results.len());

    let pick = results.first().expect("seeded catalog is never empty");
    let provider = state
        .identity
        .get_service_provider_by_id(pick.provider_id)
        .expect("seeded listings reference roster providers");
    println!(
        "booking '{}' (${} per {:?}) from {}",
        pick.name, pick.price, pick.price_type, provider.name
    );

    let booking = state.bookings.create_booking(NewBooking {
        service_id: pick.id,
        service_name: pick.name.clone(),
        provider_id: provider.id,
        provider_name: provider.name.clone(),
        consumer_id: consumer.id,
        consumer_name: consumer.name.clone(),
        price: pick.price,
        date: chrono::Utc::now().date_naive(),
        time: "09:00 AM".to_string(),
        status: BookingStatus::Upcoming,
        notes: None,
        location: Some(consumer.location.clone()),
    })?;

    // Open a thread with the provider about the new booking.
    let provider_id = provider.id;
    let conversation = state.start_new_conversation(
        vec![consumer.id, provider_id],
        "Hi! Just booked your service, does the morning slot work?",
        Some(booking.id),
    )?;
    state.send_message(conversation.id, "Happy to adjust the time if needed.")?;

    let upcoming = state.bookings.get_upcoming_bookings(consumer.id, UserRole::Consumer);
    println!("{} upcoming booking(s)", upcoming.len());

    for notice in state.drain_notices() {
        println!("[{:?}] {}", notice.kind, notice.text);
    }

    Ok(())
}
