use hustlr_shared::BookingStatus;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The operation requires an active session and none exists.
    #[error("You must be logged in to perform this action")]
    NotAuthenticated,

    /// No roster entry matches the given email or id.
    #[error("User not found")]
    UserNotFound,

    /// Login was attempted with an empty password.
    #[error("Invalid password")]
    InvalidPassword,

    /// Signup was attempted with an email already in the roster.
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// No listing matches the given id.
    #[error("Service not found")]
    ServiceNotFound,

    /// No booking matches the given id.
    #[error("Booking not found")]
    BookingNotFound,

    /// No conversation matches the given id.
    #[error("Conversation not found")]
    ConversationNotFound,

    /// A field failed ad-hoc validation (empty name, negative price, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested booking status change is not on the allow-list.
    #[error("Cannot move booking from '{from}' to '{to}'")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error while touching the session snapshot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session snapshot (de)serialization error.
    #[error("Session snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
