//! Shared server state.

mod key_store;

pub use key_store::KeyStore;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
};

use stronk_utils::locks::SyncRwLock;

use crate::{player::Player, world::FlatWorld};

/// State shared by every connection.
pub struct Server {
    /// The RSA key pair used for the login handshake.
    pub key_store: KeyStore,
    /// The world every player joins.
    pub world: FlatWorld,
    players: SyncRwLock<HashMap<u64, Arc<Player>>>,
    entity_ids: AtomicI32,
}

impl Server {
    /// Builds the shared state, generating the encryption keys.
    #[must_use]
    #[allow(clippy::new_without_default, reason = "construction is not trivial")]
    pub fn new() -> Self {
        Self {
            key_store: KeyStore::new(),
            world: FlatWorld::new(),
            players: SyncRwLock::new(HashMap::new()),
            entity_ids: AtomicI32::new(1),
        }
    }

    /// Allocates a fresh entity id.
    pub fn next_entity_id(&self) -> i32 {
        self.entity_ids.fetch_add(1, Ordering::Relaxed)
    }

    /// Registers a player under its connection id.
    pub fn add_player(&self, client_id: u64, player: Arc<Player>) {
        self.players.write().insert(client_id, player);
    }

    /// Removes a player by its connection id.
    pub fn remove_player(&self, client_id: u64) {
        if let Some(player) = self.players.write().remove(&client_id) {
            log::info!("{} left the game", player.profile.name);
        }
    }

    /// The number of players currently in play state.
    #[must_use]
    pub fn online_count(&self) -> i32 {
        self.players.read().len() as i32
    }
}
