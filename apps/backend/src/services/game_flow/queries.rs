use super::GameFlowService;
use crate::domain::template_pick::pick_template;
use crate::domain::{Game, GameId, Meme, Rating, Template, UserId};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::games;

impl GameFlowService {
    pub async fn get_game(&self, game_id: &GameId) -> Result<Game, AppError> {
        Ok(games::require_game(self.games.as_ref(), game_id).await?)
    }

    /// The template assigned to `user` for the current round. Stable across
    /// calls within a round.
    pub async fn get_template(&self, game_id: &GameId, user: &UserId) -> Result<Template, AppError> {
        let game = self.get_game(game_id).await?;
        pick_template(game.templates(), &game.id, user, game.current_round())
            .cloned()
            .ok_or_else(|| DomainError::template_not_found().into())
    }

    pub async fn get_memes(&self, game_id: &GameId) -> Result<Vec<Meme>, AppError> {
        let game = self.get_game(game_id).await?;
        Ok(game.active_round().map(|r| r.memes()).unwrap_or_default())
    }

    pub async fn get_ratings_from_round(&self, game_id: &GameId) -> Result<Vec<Rating>, AppError> {
        let game = self.get_game(game_id).await?;
        Ok(game.active_round().map(|r| r.ratings()).unwrap_or_default())
    }

    pub async fn get_all_ratings(&self, game_id: &GameId) -> Result<Vec<Rating>, AppError> {
        Ok(self.get_game(game_id).await?.all_ratings())
    }

    pub async fn in_progress_games(&self) -> Result<Vec<Game>, AppError> {
        Ok(self.games.list_in_progress().await?)
    }
}
