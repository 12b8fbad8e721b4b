use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::{Game, GameId, RoundNumber};
use crate::error::AppError;

impl GameFlowService {
    /// Submission deadline for `round`. No-op unless it is the active, open
    /// round of a running game.
    pub async fn close_round(&self, game_id: &GameId, round: RoundNumber) -> Result<Game, AppError> {
        let (closed, result) = self
            .run_trigger(game_id, |game, now| game.close_round(round, now))
            .await?;
        if closed {
            info!(game_id = %game_id, round, "Round closed");
        } else {
            debug!(game_id = %game_id, round, "Close ignored; round not active or already closed");
        }
        Ok(result.final_game)
    }

    /// Rating deadline for `round`: close it if needed, then open the next
    /// round or finish the game. Duplicate or stale deliveries are no-ops.
    pub async fn advance_round(
        &self,
        game_id: &GameId,
        round: RoundNumber,
    ) -> Result<Game, AppError> {
        let (advanced, result) = self
            .run_trigger(game_id, |game, now| game.advance(round, now))
            .await?;
        if advanced {
            info!(
                game_id = %game_id,
                from_round = round,
                current_round = result.final_game.current_round(),
                state = ?result.final_game.state(),
                "Round advanced"
            );
        } else {
            debug!(game_id = %game_id, round, "Advance ignored; round not active");
        }
        Ok(result.final_game)
    }
}
