//! Presence registry
//!
//! Tracks which users own live connections. A user is active iff it owns
//! at least one registered handle; multiple handles for one user are
//! multiple devices, never replacements.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use relay_core::Snowflake;
use uuid::Uuid;

use crate::connection::ConnectionHandle;

/// Registry of live connections and the users that own them
pub struct PresenceRegistry {
    /// Live handles by connection ID
    connections: DashMap<Uuid, Arc<ConnectionHandle>>,

    /// User ID to connection IDs mapping
    user_connections: DashMap<Snowflake, HashSet<Uuid>>,
}

impl PresenceRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a handle under its owner
    pub fn register(&self, handle: Arc<ConnectionHandle>) {
        let user_id = handle.user_id();
        let connection_id = handle.id();

        self.connections.insert(connection_id, handle);
        self.user_connections
            .entry(user_id)
            .or_default()
            .insert(connection_id);

        tracing::debug!(
            connection_id = %connection_id,
            user_id = %user_id,
            "Connection registered"
        );
    }

    /// Remove exactly one handle
    ///
    /// Returns true when the owner transitioned active to inactive, i.e.
    /// this was its last handle. No-op (false) for an unknown ID.
    ///
    /// The empty-set cleanup uses `remove_if` so a register racing with
    /// this call cannot have its entry dropped.
    pub fn unregister(&self, connection_id: Uuid) -> bool {
        let Some((_, handle)) = self.connections.remove(&connection_id) else {
            return false;
        };
        let user_id = handle.user_id();

        self.user_connections.alter(&user_id, |_, mut ids| {
            ids.remove(&connection_id);
            ids
        });

        let went_inactive = self
            .user_connections
            .remove_if(&user_id, |_, ids| ids.is_empty())
            .is_some();

        tracing::debug!(
            connection_id = %connection_id,
            user_id = %user_id,
            went_inactive = went_inactive,
            "Connection unregistered"
        );

        went_inactive
    }

    /// Snapshot of a user's live handles (fan-out source)
    pub fn connections_of(&self, user_id: Snowflake) -> Vec<Arc<ConnectionHandle>> {
        self.user_connections
            .get(&user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.connections.get(id).map(|h| h.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every live handle
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections.iter().map(|r| r.clone()).collect()
    }

    /// The active identity set minus the given identity, order unspecified
    pub fn active_users(&self, excluding: Snowflake) -> Vec<Snowflake> {
        self.user_connections
            .iter()
            .map(|r| *r.key())
            .filter(|&id| id != excluding)
            .collect()
    }

    /// Whether the user owns at least one live handle
    pub fn is_active(&self, user_id: Snowflake) -> bool {
        self.user_connections.contains_key(&user_id)
    }

    /// Total number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of active users
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn make_handle(user_id: i64) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(4);
        ConnectionHandle::new(Snowflake::new(user_id), tx)
    }

    #[test]
    fn test_empty_registry() {
        let registry = PresenceRegistry::new();
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.user_count(), 0);
        assert!(registry.active_users(Snowflake::new(1)).is_empty());
    }

    #[test]
    fn test_register_and_unregister() {
        let registry = PresenceRegistry::new();
        let handle = make_handle(10);

        registry.register(handle.clone());
        assert!(registry.is_active(Snowflake::new(10)));
        assert_eq!(registry.connections_of(Snowflake::new(10)).len(), 1);

        assert!(registry.unregister(handle.id()));
        assert!(!registry.is_active(Snowflake::new(10)));
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.user_count(), 0);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = PresenceRegistry::new();
        assert!(!registry.unregister(Uuid::new_v4()));

        let handle = make_handle(10);
        registry.register(handle.clone());
        assert!(registry.unregister(handle.id()));
        // Second unregister of the same handle
        assert!(!registry.unregister(handle.id()));
    }

    #[test]
    fn test_second_handle_is_additional_device() {
        let registry = PresenceRegistry::new();
        let first = make_handle(10);
        let second = make_handle(10);

        registry.register(first.clone());
        registry.register(second.clone());

        assert_eq!(registry.connections_of(Snowflake::new(10)).len(), 2);
        assert_eq!(registry.user_count(), 1);

        // Dropping one device keeps the user active
        assert!(!registry.unregister(first.id()));
        assert!(registry.is_active(Snowflake::new(10)));

        // Dropping the last one reports the transition
        assert!(registry.unregister(second.id()));
        assert!(!registry.is_active(Snowflake::new(10)));
    }

    #[test]
    fn test_active_users_excludes_viewer() {
        let registry = PresenceRegistry::new();
        registry.register(make_handle(10));
        registry.register(make_handle(20));
        registry.register(make_handle(30));

        let mut seen = registry.active_users(Snowflake::new(20));
        seen.sort();
        assert_eq!(seen, vec![Snowflake::new(10), Snowflake::new(30)]);

        // A viewer that is not active sees everyone
        assert_eq!(registry.active_users(Snowflake::new(99)).len(), 3);
    }
}
