//! Stale-response guard for overlapping fetches.
//!
//! Responses to independently issued requests can arrive in any order. A
//! caller that keeps "the latest" result for a logical target (the menu
//! list, the permissions of the role being edited) tags each request with a
//! ticket and only keeps a response whose ticket is still the newest one
//! issued for that target. Superseded requests still run to completion.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    seq: u64,
}

impl<K> Ticket<K> {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug)]
struct SequencerState<K> {
    next: u64,
    latest: HashMap<K, u64>,
}

#[derive(Debug)]
pub struct RequestSequencer<K> {
    state: Mutex<SequencerState<K>>,
}

impl<K: Eq + Hash + Clone> Default for RequestSequencer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> RequestSequencer<K> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SequencerState {
                next: 0,
                latest: HashMap::new(),
            }),
        }
    }

    /// New ticket for `key`; supersedes every earlier ticket for it
    pub fn issue(&self, key: K) -> Ticket<K> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.next += 1;
        let seq = state.next;
        state.latest.insert(key.clone(), seq);
        Ticket { key, seq }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.latest.get(&ticket.key) == Some(&ticket.seq)
    }

    /// `Some(value)` only if `ticket` is still the newest for its key
    pub fn accept<T>(&self, ticket: &Ticket<K>, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(seq = ticket.seq, "discarding stale response");
            None
        }
    }

    /// Issue a ticket, await `request`, and keep its output only if no
    /// newer request for `key` was issued meanwhile.
    pub async fn latest<F: Future>(&self, key: K, request: F) -> Option<F::Output> {
        let ticket = self.issue(key);
        let output = request.await;
        self.accept(&ticket, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn newer_ticket_supersedes_older() {
        let seq = RequestSequencer::new();
        let first = seq.issue("menus");
        let second = seq.issue("menus");
        let other = seq.issue("roles");

        assert!(second.seq() > first.seq());
        assert_eq!(seq.accept(&first, 1), None);
        assert_eq!(seq.accept(&second, 2), Some(2));
        // keys are independent
        assert!(seq.is_current(&other));
    }

    #[tokio::test]
    async fn slow_superseded_response_is_dropped() {
        let seq = RequestSequencer::new();

        let slow = seq.latest(7, async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            "old"
        });
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            seq.latest(7, async { "new" }).await
        };

        let (slow, fast) = tokio::join!(slow, fast);
        assert_eq!(slow, None);
        assert_eq!(fast, Some("new"));
    }
}
