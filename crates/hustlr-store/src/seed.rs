//! Startup seed data.
//!
//! Populates the stores with the same shape of mock data the UI expects at
//! first paint: a small fixed roster, a randomised catalog with reviews,
//! a handful of bookings in every lifecycle state, and three seeded
//! conversation threads.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use hustlr_shared::{
    BookingStatus, ConversationId, MessageId, PriceType, ReviewId, ServiceCategory, UserId,
    UserRole,
};

use crate::bookings::BookingStore;
use crate::conversations::ConversationStore;
use crate::identity::IdentityStore;
use crate::listings::ListingStore;
use crate::models::{
    Booking, BusinessProfile, Conversation, Message, Review, Service, ServiceLocation,
    Subscription, User,
};
use crate::state::MarketState;

/// Well-known users created by seeding, handy for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct SeedUsers {
    /// "consumer@example.com" / John Consumer.
    pub consumer: UserId,
    /// "business@example.com" / Jane Business.
    pub business: UserId,
    pub sandra: UserId,
    pub michael: UserId,
    pub julia: UserId,
    pub cleanpro: UserId,
}

const CITIES: &[(&str, &[&str])] = &[
    ("Sydney", &["CBD", "Bondi", "Manly", "Parramatta", "Chatswood"]),
    ("Melbourne", &["CBD", "St Kilda", "Fitzroy", "Richmond", "South Yarra"]),
    ("Brisbane", &["CBD", "Fortitude Valley", "New Farm", "West End", "Paddington"]),
    ("Perth", &["CBD", "Fremantle", "Subiaco", "Leederville", "Mount Lawley"]),
    ("Adelaide", &["CBD", "Glenelg", "Norwood", "Unley", "Prospect"]),
];

const FIRST_NAMES: &[&str] = &[
    "James", "Emma", "Liam", "Olivia", "Noah", "Ava", "William", "Sophia", "Benjamin", "Isabella",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

const COMMENTS: &[&str] = &[
    "Excellent service, very professional and timely.",
    "Great work, would definitely recommend!",
    "Very satisfied with the quality of work.",
    "Prompt service and good communication.",
    "Reasonable prices and excellent results.",
    "Highly recommended for their expertise.",
    "Very thorough and professional.",
    "Great value for money.",
    "Excellent attention to detail.",
    "Very reliable and trustworthy.",
];

fn price_range(category: ServiceCategory) -> (f64, f64) {
    match category {
        ServiceCategory::Painting => (50.0, 150.0),
        ServiceCategory::Cleaning => (30.0, 100.0),
        ServiceCategory::Plumbing => (80.0, 200.0),
        ServiceCategory::Electrical => (70.0, 180.0),
        ServiceCategory::Repair => (60.0, 160.0),
    }
}

fn capitalised(category: ServiceCategory) -> String {
    let name = category.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Populate every store. `per_category` controls catalog volume.
pub fn seed(state: &mut MarketState, per_category: usize) -> SeedUsers {
    let users = seed_roster(&mut state.identity);
    seed_catalog(&mut state.listings, users, per_category);
    seed_bookings(&mut state.bookings, users);
    seed_conversations(&mut state.conversations, users);
    users
}

fn consumer(name: &str, email: &str, phone: &str, location: &str) -> User {
    User {
        id: UserId::new(),
        name: name.to_string(),
        email: email.to_string(),
        password: "password".to_string(),
        role: UserRole::Consumer,
        phone: phone.to_string(),
        location: location.to_string(),
        average_rating: 0.0,
        review_count: 0,
        subscription: Subscription::free(),
        business: None,
    }
}

fn seed_roster(identity: &mut IdentityStore) -> SeedUsers {
    let today = Utc::now().date_naive();

    let mut john = consumer("John Consumer", "consumer@example.com", "555-123-4567", "New York");
    john.average_rating = 4.7;
    john.review_count = 12;
    john.subscription = Subscription {
        active: true,
        plan: "Basic Weekly".to_string(),
        next_billing_date: Some(today + Duration::days(7)),
        started_on: Some(today),
    };

    let jane = User {
        id: UserId::new(),
        name: "Jane Business".to_string(),
        email: "business@example.com".to_string(),
        password: "password".to_string(),
        role: UserRole::Business,
        phone: "555-987-6543".to_string(),
        location: "Boston".to_string(),
        average_rating: 4.9,
        review_count: 48,
        subscription: Subscription {
            active: true,
            plan: "Pro Weekly".to_string(),
            next_billing_date: Some(today + Duration::days(7)),
            started_on: Some(today - Duration::days(14)),
        },
        business: Some(BusinessProfile {
            years_in_business: 5,
            description: "Professional painting services for residential and commercial clients."
                .to_string(),
        }),
    };

    let sandra = consumer("Sandra East", "sandra@example.com", "555-222-3333", "San Francisco");
    let michael = consumer("Michael West", "michael@example.com", "555-444-5555", "San Francisco");
    let julia = consumer("Julia South", "julia@example.com", "555-666-7777", "Oakland");

    let cleanpro = User {
        id: UserId::new(),
        name: "CleanPro Services".to_string(),
        email: "cleanpro@example.com".to_string(),
        password: "password".to_string(),
        role: UserRole::Business,
        phone: "555-888-9999".to_string(),
        location: "San Francisco".to_string(),
        average_rating: 4.6,
        review_count: 31,
        subscription: Subscription::free(),
        business: Some(BusinessProfile {
            years_in_business: 8,
            description: "Commercial and residential cleaning.".to_string(),
        }),
    };

    let users = SeedUsers {
        consumer: john.id,
        business: jane.id,
        sandra: sandra.id,
        michael: michael.id,
        julia: julia.id,
        cleanpro: cleanpro.id,
    };

    for user in [john, jane, sandra, michael, julia, cleanpro] {
        identity.insert_user(user);
    }

    users
}

fn seed_catalog(listings: &mut ListingStore, users: SeedUsers, per_category: usize) {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();
    let providers = [users.business, users.cleanpro];

    for category in ServiceCategory::ALL {
        let (min_price, max_price) = price_range(category);

        for _ in 0..per_category {
            let (city, suburbs) = CITIES.choose(&mut rng).copied().unwrap_or(CITIES[0]);
            let suburb = suburbs.choose(&mut rng).copied().unwrap_or("CBD");

            let service = Service {
                id: hustlr_shared::ServiceId::new(),
                name: format!("{} Service in {suburb}", capitalised(category)),
                description: format!(
                    "Professional {category} services in {suburb}, {city}. \
                     Experienced team, quality work, and competitive rates."
                ),
                price: rng.gen_range(min_price..=max_price).round(),
                price_type: if rng.gen_bool(0.5) {
                    PriceType::Hour
                } else {
                    PriceType::Job
                },
                image_url: "/images/placeholders/service-placeholder.png".to_string(),
                rating: 0.0,
                review_count: 0,
                provider_id: *providers.choose(&mut rng).unwrap_or(&users.business),
                category,
                location: ServiceLocation {
                    city: city.to_string(),
                    suburb: suburb.to_string(),
                    postcode: rng.gen_range(2000..=9999),
                },
            };
            let service_id = service.id;
            listings.insert_seed_service(service);

            // 1-5 four-or-five-star reviews, dated within the last month.
            for _ in 0..rng.gen_range(1..=5) {
                let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("James");
                let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Smith");

                listings.insert_seed_review(Review {
                    id: ReviewId::new(),
                    service_id,
                    user_id: UserId::new(),
                    user_name: format!("{first} {last}"),
                    rating: rng.gen_range(4..=5),
                    comment: COMMENTS.choose(&mut rng).copied().unwrap_or(COMMENTS[0]).to_string(),
                    date: today - Duration::days(rng.gen_range(0..30)),
                });
            }
        }
    }
}

fn seed_bookings(bookings: &mut BookingStore, users: SeedUsers) {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    let fixtures = [
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "House Painting".to_string(),
            provider_id: users.business,
            provider_name: "Jane Business".to_string(),
            consumer_id: users.sandra,
            consumer_name: "Sandra East".to_string(),
            price: 120.0,
            date: date(2025, 5, 10),
            time: "09:00 AM".to_string(),
            status: BookingStatus::Upcoming,
            notes: None,
            location: Some("123 Main St, San Francisco, CA".to_string()),
        },
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "Deep Cleaning".to_string(),
            provider_id: users.cleanpro,
            provider_name: "CleanPro Services".to_string(),
            consumer_id: users.sandra,
            consumer_name: "Sandra East".to_string(),
            price: 95.0,
            date: date(2025, 5, 15),
            time: "10:00 AM".to_string(),
            status: BookingStatus::Upcoming,
            notes: None,
            location: Some("123 Main St, San Francisco, CA".to_string()),
        },
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "Wall Repairs".to_string(),
            provider_id: users.business,
            provider_name: "Jane Business".to_string(),
            consumer_id: users.sandra,
            consumer_name: "Sandra East".to_string(),
            price: 95.0,
            date: date(2025, 4, 28),
            time: "02:00 PM".to_string(),
            status: BookingStatus::Completed,
            notes: None,
            location: Some("123 Main St, San Francisco, CA".to_string()),
        },
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "Office Cleaning".to_string(),
            provider_id: users.cleanpro,
            provider_name: "CleanPro Services".to_string(),
            consumer_id: users.sandra,
            consumer_name: "Sandra East".to_string(),
            price: 150.0,
            date: date(2025, 4, 20),
            time: "11:00 AM".to_string(),
            status: BookingStatus::Completed,
            notes: None,
            location: Some("123 Main St, San Francisco, CA".to_string()),
        },
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "House Painting".to_string(),
            provider_id: users.business,
            provider_name: "Jane Business".to_string(),
            consumer_id: users.michael,
            consumer_name: "Michael West".to_string(),
            price: 200.0,
            date: date(2025, 4, 15),
            time: "09:30 AM".to_string(),
            status: BookingStatus::Canceled,
            notes: None,
            location: Some("456 Oak St, San Francisco, CA".to_string()),
        },
        Booking {
            id: hustlr_shared::BookingId::new(),
            service_id: hustlr_shared::ServiceId::new(),
            service_name: "Custom Murals".to_string(),
            provider_id: users.business,
            provider_name: "Jane Business".to_string(),
            consumer_id: users.julia,
            consumer_name: "Julia South".to_string(),
            price: 300.0,
            date: date(2025, 5, 25),
            time: "01:00 PM".to_string(),
            status: BookingStatus::Pending,
            notes: Some("I'd like a space-themed mural for my son's room".to_string()),
            location: Some("789 Elm St, Oakland, CA".to_string()),
        },
    ];

    for booking in fixtures {
        bookings.insert_seed_booking(booking);
    }
}

fn seed_conversations(conversations: &mut ConversationStore, users: SeedUsers) {
    let at = |d, h, m| {
        Utc.with_ymd_and_hms(2025, 5, d, h, m, 0)
            .single()
            .unwrap_or_else(Utc::now)
    };

    fn thread(
        participants: [UserId; 2],
        entries: &[(UserId, &str, chrono::DateTime<Utc>, bool)],
        unread: bool,
    ) -> (Conversation, Vec<Message>) {
        let conversation_id = ConversationId::new();
        let messages: Vec<Message> = entries
            .iter()
            .map(|(sender_id, text, timestamp, is_read)| Message {
                id: MessageId::new(),
                conversation_id,
                sender_id: *sender_id,
                text: text.to_string(),
                timestamp: *timestamp,
                is_read: *is_read,
            })
            .collect();

        let last = messages.last().cloned();
        (
            Conversation {
                id: conversation_id,
                participants: participants.to_vec(),
                last_message_text: last.as_ref().map(|m| m.text.clone()).unwrap_or_default(),
                last_message_at: last.map(|m| m.timestamp).unwrap_or_else(Utc::now),
                has_unread_messages: unread,
                related_to_booking: None,
            },
            messages,
        )
    }

    let (sandra, jane) = (users.sandra, users.business);
    let (conv, messages) = thread(
        [sandra, jane],
        &[
            (sandra, "Hi, I'm interested in your wall painting service", at(7, 10, 30), true),
            (jane, "Hello Sandra! I'd be happy to help with your painting needs.", at(7, 10, 32), true),
            (sandra, "I need to repaint my living room walls, around 400 sq ft.", at(7, 10, 35), true),
            (jane, "I can definitely help with that. What color are you thinking of?", at(7, 10, 38), true),
            (sandra, "When can you come to check the walls?", at(7, 10, 40), false),
        ],
        true,
    );
    conversations.insert_seed_conversation(conv, messages);

    let (michael, julia) = (users.michael, users.julia);
    let (conv, messages) = thread(
        [michael, jane],
        &[
            (michael, "Hello, do you offer wall repair services?", at(6, 15, 10), true),
            (jane, "Yes, we do! What kind of repair do you need?", at(6, 15, 12), true),
            (michael, "Thanks for the quick response!", at(6, 15, 22), true),
        ],
        false,
    );
    conversations.insert_seed_conversation(conv, messages);

    let (conv, messages) = thread(
        [julia, jane],
        &[
            (julia, "I wanted to thank you for the beautiful mural.", at(5, 9, 10), true),
            (jane, "You're very welcome, Julia! I'm glad she likes it.", at(5, 9, 12), true),
            (julia, "The mural looks amazing! Thank you so much!", at(5, 9, 18), true),
        ],
        false,
    );
    conversations.insert_seed_conversation(conv, messages);
}
