//! Conversation store: message threads and read tracking.
//!
//! A conversation has two de facto states, "has unread" and "fully read":
//! `send_message` sets the unread flag, `mark_conversation_as_read` clears
//! it. Threads are never closed, archived, or deleted, and messages are
//! never edited.
//!
//! Operations that author content take the sender's id explicitly; the
//! [`MarketState`](crate::state::MarketState) facade resolves the active
//! session before calling in and maps a missing session to
//! `NotAuthenticated`.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, warn};

use hustlr_shared::{BookingId, ConversationId, MessageId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Conversation, Message};
use crate::notify::{Notice, NoticeQueue};

/// Conversation arena plus per-conversation message lists, keyed by
/// conversation id.
#[derive(Default)]
pub struct ConversationStore {
    conversations: HashMap<ConversationId, Conversation>,
    messages: HashMap<ConversationId, Vec<Message>>,
    notices: NoticeQueue,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_conversation(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.get(&id)
    }

    /// Messages in a conversation, oldest first. Empty if the conversation
    /// does not exist.
    pub fn get_conversation_messages(&self, id: ConversationId) -> &[Message] {
        self.messages.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Conversations the user participates in, most recent activity first.
    pub fn get_user_conversations(&self, user_id: UserId) -> Vec<&Conversation> {
        let mut results: Vec<&Conversation> = self
            .conversations
            .values()
            .filter(|conv| conv.participants.contains(&user_id))
            .collect();
        results.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        results
    }

    /// Append a message from `sender_id` to an existing conversation and
    /// refresh the thread's last-message snapshot.
    pub fn send_message(
        &mut self,
        sender_id: UserId,
        conversation_id: ConversationId,
        text: &str,
    ) -> Result<Message> {
        if text.trim().is_empty() {
            return Err(StoreError::Validation("message text is required".to_string()));
        }

        let Some(conversation) = self.conversations.get_mut(&conversation_id) else {
            warn!(conversation = %conversation_id, "Send failed: conversation not found");
            self.notices.push(Notice::error("Conversation not found"));
            return Err(StoreError::ConversationNotFound);
        };

        let message = Message {
            id: MessageId::new(),
            conversation_id,
            sender_id,
            text: text.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };

        conversation.last_message_text = message.text.clone();
        conversation.last_message_at = message.timestamp;
        conversation.has_unread_messages = true;

        self.messages
            .entry(conversation_id)
            .or_default()
            .push(message.clone());

        info!(message = %message.id, conversation = %conversation_id, "Message sent");
        Ok(message)
    }

    /// Clear the thread's unread flag and mark every message not authored
    /// by `user_id` as read. The reader's own messages are untouched.
    pub fn mark_conversation_as_read(
        &mut self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> Result<()> {
        let Some(conversation) = self.conversations.get_mut(&conversation_id) else {
            return Err(StoreError::ConversationNotFound);
        };

        conversation.has_unread_messages = false;

        if let Some(messages) = self.messages.get_mut(&conversation_id) {
            for message in messages.iter_mut() {
                if message.sender_id != user_id {
                    message.is_read = true;
                }
            }
        }

        Ok(())
    }

    /// Create a conversation together with its mandatory initial message.
    ///
    /// Both records are created within this store; when a booking id is
    /// supplied there is no cross-store atomicity with the booking arena.
    pub fn start_new_conversation(
        &mut self,
        sender_id: UserId,
        participant_ids: Vec<UserId>,
        initial_message: &str,
        related_to_booking: Option<BookingId>,
    ) -> Result<Conversation> {
        if initial_message.trim().is_empty() {
            return Err(StoreError::Validation("initial message is required".to_string()));
        }
        if participant_ids.len() < 2 {
            return Err(StoreError::Validation(
                "a conversation needs at least two participants".to_string(),
            ));
        }
        if !participant_ids.contains(&sender_id) {
            return Err(StoreError::Validation(
                "the sender must be a participant".to_string(),
            ));
        }

        let now = Utc::now();
        let conversation = Conversation {
            id: ConversationId::new(),
            participants: participant_ids,
            last_message_text: initial_message.to_string(),
            last_message_at: now,
            has_unread_messages: true,
            related_to_booking,
        };

        let message = Message {
            id: MessageId::new(),
            conversation_id: conversation.id,
            sender_id,
            text: initial_message.to_string(),
            timestamp: now,
            is_read: false,
        };

        self.messages.insert(conversation.id, vec![message]);
        self.conversations
            .insert(conversation.id, conversation.clone());

        info!(conversation = %conversation.id, sender = %sender_id, "Conversation started");
        self.notices.push(Notice::success("New conversation started"));
        Ok(conversation)
    }

    /// Remove and return pending toast notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Used by seeding to register a pre-built thread with its history.
    pub(crate) fn insert_seed_conversation(
        &mut self,
        conversation: Conversation,
        messages: Vec<Message>,
    ) {
        self.messages.insert(conversation.id, messages);
        self.conversations.insert(conversation.id, conversation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(store: &mut ConversationStore, a: UserId, b: UserId) -> Conversation {
        store
            .start_new_conversation(a, vec![a, b], "Hi, I'm interested in your service", None)
            .unwrap()
    }

    #[test]
    fn starting_a_conversation_creates_the_initial_message() {
        let mut store = ConversationStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());

        let conv = started(&mut store, alice, bob);

        let messages = store.get_conversation_messages(conv.id);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, alice);
        assert!(!messages[0].is_read);
        assert!(conv.has_unread_messages);
        assert_eq!(conv.last_message_text, "Hi, I'm interested in your service");
    }

    #[test]
    fn start_validates_participants_and_message() {
        let mut store = ConversationStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());

        assert!(matches!(
            store.start_new_conversation(alice, vec![alice, bob], "  ", None),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.start_new_conversation(alice, vec![alice], "hi", None),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.start_new_conversation(alice, vec![bob, UserId::new()], "hi", None),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn send_refreshes_last_message_snapshot() {
        let mut store = ConversationStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());
        let conv = started(&mut store, alice, bob);
        store.mark_conversation_as_read(conv.id, bob).unwrap();

        let message = store
            .send_message(bob, conv.id, "When can you come to check the walls?")
            .unwrap();

        let conv = store.get_conversation(conv.id).unwrap();
        assert_eq!(conv.last_message_text, message.text);
        assert_eq!(conv.last_message_at, message.timestamp);
        assert!(conv.has_unread_messages);
        assert_eq!(store.get_conversation_messages(conv.id).len(), 2);
    }

    #[test]
    fn send_to_unknown_conversation_fails() {
        let mut store = ConversationStore::new();
        assert!(matches!(
            store.send_message(UserId::new(), ConversationId::new(), "hello"),
            Err(StoreError::ConversationNotFound)
        ));
    }

    #[test]
    fn read_tracking_only_touches_incoming_messages() {
        let mut store = ConversationStore::new();
        let (alice, bob) = (UserId::new(), UserId::new());
        let conv = started(&mut store, alice, bob);
        store.send_message(bob, conv.id, "Hello Sandra!").unwrap();
        store.send_message(alice, conv.id, "What are your rates?").unwrap();

        store.mark_conversation_as_read(conv.id, alice).unwrap();

        let messages = store.get_conversation_messages(conv.id);
        for message in messages {
            if message.sender_id == alice {
                // Sender's own messages keep their original flag.
                assert!(!message.is_read);
            } else {
                assert!(message.is_read);
            }
        }
        assert!(!store.get_conversation(conv.id).unwrap().has_unread_messages);
    }

    #[test]
    fn user_conversations_are_membership_scoped() {
        let mut store = ConversationStore::new();
        let (alice, bob, carol) = (UserId::new(), UserId::new(), UserId::new());
        started(&mut store, alice, bob);
        started(&mut store, bob, carol);

        assert_eq!(store.get_user_conversations(alice).len(), 1);
        assert_eq!(store.get_user_conversations(bob).len(), 2);
        assert!(store.get_user_conversations(UserId::new()).is_empty());
    }
}
