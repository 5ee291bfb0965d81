//! Application state composing the four domain stores.
//!
//! Each store exclusively owns its arena; [`MarketState`] is the single
//! mount point the view tree reaches into. Session-gated operations are
//! exposed here so the session check lives in one place: the facade
//! resolves the active user from the identity store and maps a missing
//! session to `NotAuthenticated` before touching the target store.
//!
//! Multi-store workflows (booking a listing and opening a thread about it)
//! stay two sequential calls with no atomicity between arenas.

use std::path::Path;

use hustlr_shared::{BookingId, ConversationId, UserId};

use crate::bookings::BookingStore;
use crate::config::StoreConfig;
use crate::conversations::ConversationStore;
use crate::error::{Result, StoreError};
use crate::identity::IdentityStore;
use crate::listings::ListingStore;
use crate::models::{Conversation, Message};
use crate::notify::{Notice, NoticeQueue};
use crate::seed::{self, SeedUsers};
use crate::session::SessionFile;

/// Central application state.
pub struct MarketState {
    pub identity: IdentityStore,
    pub listings: ListingStore,
    pub bookings: BookingStore,
    pub conversations: ConversationStore,
    notices: NoticeQueue,
}

impl MarketState {
    /// Build the state per `config`: restore any saved session and seed
    /// the arenas with mock data unless seeding is disabled.
    pub fn new(config: &StoreConfig) -> Result<(Self, Option<SeedUsers>)> {
        let session_file = match config.data_dir {
            Some(ref dir) => {
                std::fs::create_dir_all(dir)?;
                SessionFile::open_at(&dir.join("session.json"))
            }
            None => SessionFile::new()?,
        };

        let mut state = Self::with_session_file(session_file)?;
        let seeded = config
            .seed
            .then(|| seed::seed(&mut state, config.seed_per_category));
        Ok((state, seeded))
    }

    /// Unseeded state with an explicit session snapshot path. Used by
    /// tests and embedders with custom directory layouts.
    pub fn open_at(session_path: &Path) -> Result<Self> {
        Self::with_session_file(SessionFile::open_at(session_path))
    }

    fn with_session_file(session_file: SessionFile) -> Result<Self> {
        Ok(Self {
            identity: IdentityStore::new(session_file)?,
            listings: ListingStore::new(),
            bookings: BookingStore::new(),
            conversations: ConversationStore::new(),
            notices: NoticeQueue::default(),
        })
    }

    /// Send a message as the active session user.
    pub fn send_message(&mut self, conversation_id: ConversationId, text: &str) -> Result<Message> {
        let sender_id = self.require_session("You must be logged in to send messages")?;
        self.conversations.send_message(sender_id, conversation_id, text)
    }

    /// Start a conversation as the active session user.
    pub fn start_new_conversation(
        &mut self,
        participant_ids: Vec<UserId>,
        initial_message: &str,
        related_to_booking: Option<BookingId>,
    ) -> Result<Conversation> {
        let sender_id = self.require_session("You must be logged in to start conversations")?;
        self.conversations.start_new_conversation(
            sender_id,
            participant_ids,
            initial_message,
            related_to_booking,
        )
    }

    /// Mark a thread as read for the active session user.
    pub fn mark_conversation_as_read(&mut self, conversation_id: ConversationId) -> Result<()> {
        let user_id = self.require_session("You must be logged in to read messages")?;
        self.conversations.mark_conversation_as_read(conversation_id, user_id)
    }

    /// Drain the pending toast notices of every store, facade first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut notices = self.notices.drain();
        notices.extend(self.identity.drain_notices());
        notices.extend(self.listings.drain_notices());
        notices.extend(self.bookings.drain_notices());
        notices.extend(self.conversations.drain_notices());
        notices
    }

    fn require_session(&mut self, toast: &str) -> Result<UserId> {
        match self.identity.session() {
            Some(user) => Ok(user.id),
            None => {
                self.notices.push(Notice::error(toast));
                Err(StoreError::NotAuthenticated)
            }
        }
    }
}
