use tracing::debug;

use super::GameFlowService;
use crate::domain::{Game, GameId, Meme, MemeId, NewMeme, NewRating, Rating, TemplateId, UserId};
use crate::error::AppError;

impl GameFlowService {
    /// Mark `user` READY. A user who is not in the game is accepted without
    /// effect beyond the version bump.
    pub async fn set_player_ready(&self, game_id: &GameId, user: &UserId) -> Result<Game, AppError> {
        let (matched, result) = self
            .run_mutation(game_id, |game, now| Ok(game.set_player_ready(user, now)))
            .await?;
        debug!(game_id = %game_id, user_id = %user, matched, "Player ready");
        Ok(result.final_game)
    }

    /// Submit or replace the acting user's meme in the active round.
    ///
    /// Closes the round early once every player has a submission in.
    pub async fn create_meme(
        &self,
        game_id: &GameId,
        template_id: TemplateId,
        meme: NewMeme,
        acting_user: &UserId,
    ) -> Result<Meme, AppError> {
        let (stored, result) = self
            .run_mutation(game_id, |game, now| {
                let stored = game.submit_meme(template_id, meme, acting_user)?;
                if game.all_submitted() {
                    game.close_round(game.current_round(), now);
                }
                Ok(stored)
            })
            .await?;
        debug!(
            game_id = %game_id,
            meme_id = %stored.id,
            user_id = %acting_user,
            version = result.final_version(),
            "Meme submitted"
        );
        Ok(stored)
    }

    /// Rate a meme of the active round.
    ///
    /// Advances the game early once every player has rated every meme they
    /// did not author.
    pub async fn create_rating(
        &self,
        game_id: &GameId,
        meme_id: MemeId,
        rating: NewRating,
        acting_user: &UserId,
    ) -> Result<Rating, AppError> {
        let (stored, result) = self
            .run_mutation(game_id, |game, now| {
                let stored = game.rate_meme(meme_id, rating, acting_user)?;
                if game.all_rated() {
                    game.advance(game.current_round(), now);
                }
                Ok(stored)
            })
            .await?;
        debug!(
            game_id = %game_id,
            meme_id = %meme_id,
            user_id = %acting_user,
            score = stored.score,
            version = result.final_version(),
            "Meme rated"
        );
        Ok(stored)
    }
}
