//! # hustlr-shared
//!
//! Types and pure helpers shared between the Hustlr domain stores and the
//! view layer: id newtypes, the closed domain enums, and the derivation
//! helpers (rating averages, relative-time formatting, listing
//! filter/sort predicates).
//!
//! Nothing in this crate holds state or performs I/O.

pub mod helpers;
pub mod types;

pub use types::*;
