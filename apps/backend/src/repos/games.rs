//! Game repository: whole-aggregate load and save.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{Game, GameId, GameState};
use crate::errors::domain::{ConflictKind, DomainError};

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError>;

    /// Replace the stored aggregate and return it with its version bumped.
    ///
    /// The stored version must still equal `game.version`.
    async fn save(&self, game: Game) -> Result<Game, DomainError>;

    async fn list_in_progress(&self) -> Result<Vec<Game>, DomainError>;
}

/// Find game by ID or return error if not found.
pub async fn require_game(
    repo: &dyn GameRepository,
    game_id: &GameId,
) -> Result<Game, DomainError> {
    repo.find_by_id(game_id)
        .await?
        .ok_or_else(DomainError::game_not_found)
}

/// Process-local store. Readers always get a complete snapshot because saves
/// swap the whole aggregate under the shard lock.
#[derive(Debug, Default)]
pub struct InMemoryGames {
    games: DashMap<GameId, Game>,
}

impl InMemoryGames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl GameRepository for InMemoryGames {
    async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(game_id).map(|g| g.value().clone()))
    }

    async fn save(&self, mut game: Game) -> Result<Game, DomainError> {
        match self.games.entry(game.id.clone()) {
            Entry::Occupied(mut slot) => {
                let stored = slot.get().version;
                if stored != game.version {
                    return Err(DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game version mismatch: expected {}, but game has version {}",
                            game.version, stored
                        ),
                    ));
                }
                game.version += 1;
                slot.insert(game.clone());
            }
            Entry::Vacant(slot) => {
                game.version += 1;
                slot.insert(game.clone());
            }
        }
        Ok(game)
    }

    async fn list_in_progress(&self) -> Result<Vec<Game>, DomainError> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.state() == GameState::InProgress)
            .map(|g| g.value().clone())
            .collect())
    }
}
