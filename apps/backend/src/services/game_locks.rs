//! Per-game write serialization.
//!
//! Uses DashMap for concurrent lookup and one async mutex per game, so
//! mutations of different games never wait on each other. An entry lives only
//! while someone holds or waits for it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::GameId;

#[derive(Debug, Default)]
pub struct GameLocks {
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

/// Exclusive write access to one game. Dropping it releases the lock and
/// evicts the map entry when nobody else is queued on it.
#[derive(Debug)]
pub struct GameLockGuard<'a> {
    locks: &'a GameLocks,
    game_id: GameId,
    _guard: OwnedMutexGuard<()>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to `game_id`.
    pub async fn acquire(&self, game_id: &GameId) -> GameLockGuard<'_> {
        // Clone the Arc out before awaiting so the shard lock is not held.
        let lock = self
            .locks
            .entry(game_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        let guard = lock.lock_owned().await;
        GameLockGuard {
            locks: self,
            game_id: game_id.clone(),
            _guard: guard,
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for GameLockGuard<'_> {
    fn drop(&mut self) {
        // Map + this guard. Waiters hold their own clone, and new ones need the
        // shard lock that remove_if holds while checking.
        self.locks
            .locks
            .remove_if(&self.game_id, |_, lock| Arc::strong_count(lock) <= 2);
    }
}
