use parking_lot::Mutex;
use std::collections::HashMap;

use crate::config::ConversationConfig;
use crate::models::{ChatMessage, ConversationEntry, Role};

/// A single user's history. Index 0 is always the system preamble.
#[derive(Debug, Clone)]
struct UserHistory {
    entries: Vec<ConversationEntry>,
    /// Store-wide activity counter at the last append, breaks timestamp ties
    last_seq: u64,
}

impl UserHistory {
    fn seeded(preamble: &str, seq: u64) -> Self {
        Self {
            entries: vec![ConversationEntry::new(Role::System, preamble)],
            last_seq: seq,
        }
    }

    fn last_activity(&self) -> (chrono::DateTime<chrono::Utc>, u64) {
        let ts = self
            .entries
            .last()
            .map(|e| e.timestamp)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
        (ts, self.last_seq)
    }
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserHistory>,
    seq: u64,
}

impl Inner {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Drop the user whose last entry is oldest.
    fn evict_least_recent(&mut self) {
        let oldest = self
            .users
            .iter()
            .min_by_key(|(_, h)| h.last_activity())
            .map(|(id, h)| (id.clone(), h.last_activity().0));

        if let Some((user_id, last_active)) = oldest {
            tracing::info!(
                "Evicting conversation of {user_id} (last activity: {})",
                last_active.format("%Y-%m-%d %H:%M:%S")
            );
            self.users.remove(&user_id);
        }
    }
}

/// Bounded in-memory conversation histories keyed by user id.
///
/// At most `max_users` histories are kept; creating one more evicts the least
/// recently active user. Each history keeps the preamble plus at most
/// `max_history_length` later entries. All access goes through one mutex.
pub struct ConversationStore {
    inner: Mutex<Inner>,
    max_users: usize,
    max_history_length: usize,
    preamble: String,
}

impl ConversationStore {
    pub fn new(max_users: usize, max_history_length: usize, preamble: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_users: max_users.max(1),
            max_history_length,
            preamble: preamble.into(),
        }
    }

    pub fn from_config(config: &ConversationConfig, preamble: impl Into<String>) -> Self {
        Self::new(config.max_users, config.max_history_length, preamble)
    }

    /// Append an entry, creating (and possibly evicting for) the user's history first.
    pub fn add_message(&self, user_id: &str, role: Role, content: impl Into<String>) {
        let mut inner = self.inner.lock();

        if !inner.users.contains_key(user_id) {
            while inner.users.len() >= self.max_users {
                inner.evict_least_recent();
            }
            let seq = inner.next_seq();
            inner
                .users
                .insert(user_id.to_string(), UserHistory::seeded(&self.preamble, seq));
        }

        let seq = inner.next_seq();
        let max_tail = self.max_history_length;
        if let Some(history) = inner.users.get_mut(user_id) {
            history.entries.push(ConversationEntry::new(role, content));
            history.last_seq = seq;

            let tail_len = history.entries.len() - 1;
            if tail_len > max_tail {
                history.entries.drain(1..1 + (tail_len - max_tail));
            }
        }
    }

    /// The user's history without timestamps. Unknown users get just the preamble.
    pub fn get_conversation(&self, user_id: &str) -> Vec<ChatMessage> {
        let inner = self.inner.lock();
        match inner.users.get(user_id) {
            Some(history) => history.entries.iter().map(ChatMessage::from).collect(),
            None => vec![ChatMessage {
                role: Role::System,
                content: self.preamble.clone(),
            }],
        }
    }

    /// Collapse an existing history to the preamble. Returns false for unknown users.
    pub fn reset(&self, user_id: &str) -> bool {
        let mut inner = self.inner.lock();
        if !inner.users.contains_key(user_id) {
            return false;
        }
        let seq = inner.next_seq();
        inner
            .users
            .insert(user_id.to_string(), UserHistory::seeded(&self.preamble, seq));
        true
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.inner.lock().users.contains_key(user_id)
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().users.len()
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }
}
