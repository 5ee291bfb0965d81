//! Transient user-facing notifications.
//!
//! Every mutating store operation pushes a [`Notice`] describing the
//! outcome, independent of the value it returns. The view layer drains the
//! queue and renders each notice as a short-lived toast; nothing here is
//! queryable after it has been drained.

use serde::Serialize;

/// Visual flavour of a notice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One transient toast message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// FIFO queue of pending notices, owned by each store.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    /// Remove and return all pending notices, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue_in_order() {
        let mut queue = NoticeQueue::default();
        queue.push(Notice::success("first"));
        queue.push(Notice::error("second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].text, "first");
        assert_eq!(drained[1].kind, NoticeKind::Error);
        assert!(queue.is_empty());
    }
}
