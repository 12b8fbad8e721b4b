use tracing::{info, warn};

use super::GameFlowService;
use crate::domain::{Game, GameId, LobbyCode};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};

impl GameFlowService {
    /// Seed and persist a game for the lobby, then tell the lobby about it.
    ///
    /// A lobby yields one game. The template catalog is fetched before
    /// anything is stored, so an upstream failure leaves no game behind.
    pub async fn create_game(&self, lobby_code: &LobbyCode) -> Result<Game, AppError> {
        let lobby = self
            .lobbies
            .find_lobby_by_code(lobby_code)
            .await?
            .ok_or_else(DomainError::lobby_not_found)?;
        if let Some(existing) = &lobby.game_id {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyCreated,
                format!("Lobby already has game {existing}"),
            )
            .into());
        }
        lobby.settings.validate()?;

        let templates = self.templates.fetch_templates().await.map_err(|e| {
            warn!(lobby_code = %lobby_code, error = %e, "Template fetch failed; game not created");
            e
        })?;

        let now = self.clock.now();
        let game = Game::seed(GameId::generate(), &lobby, templates, now);
        let saved = self.games.save(game).await?;

        // The game is stored either way; a missed notice only leaves the lobby
        // without its game id.
        if let Err(e) = self
            .lobbies
            .notify_game_started(lobby_code, &saved.id, saved.started_at)
            .await
        {
            warn!(game_id = %saved.id, lobby_code = %lobby_code, error = %e, "Lobby not told about new game");
        }

        info!(
            game_id = %saved.id,
            lobby_code = %lobby_code,
            players = saved.players().len(),
            templates = saved.templates().len(),
            "Game created"
        );
        Ok(saved)
    }
}
