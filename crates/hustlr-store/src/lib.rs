//! # hustlr-store
//!
//! In-memory domain state for the Hustlr marketplace: four independent
//! stores (identity, listings, bookings, conversations) that simulate a
//! backend with mock data seeded at startup and mutated directly in
//! memory. Each store owns an id-indexed arena and exposes typed CRUD
//! helpers plus derived queries; cross-references between entities are
//! plain id values resolved at query time.
//!
//! Execution is single-threaded and synchronous: every operation runs to
//! completion on the caller's thread in response to a discrete view event.
//! Nothing persists across restarts except the active session's JSON
//! snapshot (see [`session`]).

pub mod bookings;
pub mod config;
pub mod conversations;
pub mod identity;
pub mod listings;
pub mod models;
pub mod notify;
pub mod seed;
pub mod session;
pub mod state;

mod error;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use models::*;
pub use notify::{Notice, NoticeKind};
pub use state::MarketState;
