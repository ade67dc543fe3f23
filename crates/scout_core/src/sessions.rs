use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::FilterState;

/// Telegram chat identifier; one session per chat.
pub type ChatId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub filters: FilterState,
    pub last_seen: Instant,
}

/// Filter state keyed by chat, so concurrent chats never share a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStore {
    sessions: BTreeMap<ChatId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chat's filters, creating a default session on first contact.
    pub fn filters_mut(&mut self, chat_id: ChatId, now: Instant) -> &mut FilterState {
        let session = self.sessions.entry(chat_id).or_insert_with(|| Session {
            filters: FilterState::default(),
            last_seen: now,
        });
        session.last_seen = now;
        &mut session.filters
    }

    pub fn get(&self, chat_id: ChatId) -> Option<&Session> {
        self.sessions.get(&chat_id)
    }

    pub fn evict(&mut self, chat_id: ChatId) -> bool {
        self.sessions.remove(&chat_id).is_some()
    }

    /// Drops sessions not seen for longer than `ttl`; returns how many were dropped.
    pub fn evict_idle(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            now.saturating_duration_since(session.last_seen) <= ttl
        });
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
