//! The declarative topic subscription set.
//!
//! The registry tracks which topics the process wants, independent of
//! connection state. It is the only state shared between the connected code
//! path (replay on open) and external callers (`subscribe`/`unsubscribe` at
//! any time), so it lives behind its own lock.

use std::collections::BTreeSet;

use parking_lot::RwLock;

/// Set of topics the process is subscribed to.
///
/// Set semantics: a topic is either subscribed or not, and re-subscribing is
/// idempotent. Snapshot order is lexicographic, which keeps replay
/// deterministic.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    topics: RwLock<BTreeSet<String>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic. Returns `true` if it was not already present.
    pub fn insert(&self, topic: &str) -> bool {
        self.topics.write().insert(topic.to_owned())
    }

    /// Remove a topic. Returns `true` if it was present.
    pub fn remove(&self, topic: &str) -> bool {
        self.topics.write().remove(topic)
    }

    /// Whether a topic is currently subscribed.
    #[must_use]
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.read().contains(topic)
    }

    /// Ordered snapshot of the current topic set.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.topics.read().iter().cloned().collect()
    }

    /// Number of subscribed topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.read().len()
    }

    /// Whether no topics are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.read().is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.insert("chat:org_1"));
        assert!(registry.contains("chat:org_1"));
        assert!(!registry.contains("chat:org_2"));
    }

    #[test]
    fn insert_is_idempotent() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.insert("docs:42"));
        assert!(!registry.insert("docs:42"), "second insert is a no-op");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_existing_and_missing() {
        let registry = SubscriptionRegistry::new();
        let _ = registry.insert("chat:org_1");
        assert!(registry.remove("chat:org_1"));
        assert!(!registry.remove("chat:org_1"));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_is_ordered() {
        let registry = SubscriptionRegistry::new();
        let _ = registry.insert("workflow:9");
        let _ = registry.insert("chat:org_1");
        let _ = registry.insert("docs:42");
        assert_eq!(
            registry.snapshot(),
            vec!["chat:org_1", "docs:42", "workflow:9"]
        );
    }

    #[test]
    fn snapshot_of_empty_registry() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn survives_heavy_interleaving() {
        let registry = SubscriptionRegistry::new();
        for i in 0..100 {
            let _ = registry.insert(&format!("topic:{i}"));
        }
        for i in (0..100).step_by(2) {
            let _ = registry.remove(&format!("topic:{i}"));
        }
        assert_eq!(registry.len(), 50);
        assert!(registry.contains("topic:1"));
        assert!(!registry.contains("topic:2"));
    }
}
