//! Game aggregate: roster, readiness, template pool and the ordered rounds.
//!
//! All lifecycle rules live here as plain state transitions over `&mut self`.
//! Locking, persistence and scheduling happen around it in
//! `services::game_flow`.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::game_transition::GameLifecycleView;
use super::ids::{GameId, LobbyCode, MemeId, RoundNumber, TemplateId, UserId};
use super::lobby::Lobby;
use super::meme::{Meme, NewMeme, NewRating, Rating};
use super::round::Round;
use super::settings::GameSettings;
use super::template::Template;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Creation,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Readiness {
    NotReady,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: UserId,
    pub name: String,
    pub readiness: Readiness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    state: GameState,
    current_round: RoundNumber,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub settings: GameSettings,
    pub lobby_code: LobbyCode,
    players: Vec<Player>,
    templates: Vec<Template>,
    rounds: Vec<Round>,
    /// Bumped by the repository on every save.
    pub version: u64,
}

impl Game {
    /// Seed a new game from a lobby: every member becomes a READY player and
    /// round 1 is open but untimed until the game starts.
    pub fn seed(id: GameId, lobby: &Lobby, templates: Vec<Template>, now: OffsetDateTime) -> Self {
        let players = lobby
            .players()
            .iter()
            .map(|m| Player {
                user_id: m.user_id.clone(),
                name: m.display_name(),
                readiness: Readiness::Ready,
            })
            .collect();

        Self {
            id,
            state: GameState::Creation,
            current_round: 1,
            started_at: now,
            settings: lobby.settings,
            lobby_code: lobby.code.clone(),
            players,
            templates,
            rounds: vec![Round::pending(1)],
            version: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_round(&self) -> RoundNumber {
        self.current_round
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn active_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    fn active_round_mut(&mut self) -> Result<&mut Round, DomainError> {
        self.rounds
            .last_mut()
            .ok_or_else(|| DomainError::validation(ValidationKind::RoundNotOpen, "Game has no rounds"))
    }

    pub fn has_template(&self, template_id: &TemplateId) -> bool {
        self.templates.iter().any(|t| &t.id == template_id)
    }

    /// Mark a player READY. Unknown users are accepted silently.
    ///
    /// Returns whether a player matched. A match that leaves the whole roster
    /// READY starts a game still in creation.
    pub fn set_player_ready(&mut self, user: &UserId, now: OffsetDateTime) -> bool {
        let Some(player) = self.players.iter_mut().find(|p| &p.user_id == user) else {
            return false;
        };
        player.readiness = Readiness::Ready;

        if self.state == GameState::Creation
            && self.players.iter().all(|p| p.readiness == Readiness::Ready)
        {
            self.start(now);
        }
        true
    }

    fn start(&mut self, now: OffsetDateTime) {
        self.state = GameState::InProgress;
        if let Some(round) = self.rounds.last_mut() {
            round.start_timer(now);
        }
    }

    fn ensure_playable(&self) -> Result<(), DomainError> {
        match self.state {
            GameState::Creation => Err(DomainError::validation(
                ValidationKind::GameNotStarted,
                "Game has not started",
            )),
            GameState::Finished => Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game is finished",
            )),
            GameState::InProgress => Ok(()),
        }
    }

    pub fn submit_meme(
        &mut self,
        template_id: TemplateId,
        meme: NewMeme,
        acting_user: &UserId,
    ) -> Result<Meme, DomainError> {
        self.ensure_playable()?;
        if !self.has_template(&template_id) {
            return Err(DomainError::template_not_found());
        }
        if let Some(id) = meme.id {
            let earlier = &self.rounds[..self.rounds.len().saturating_sub(1)];
            if earlier.iter().any(|r| r.find_meme(&id).is_some()) {
                return Err(DomainError::forbidden("Meme id belongs to an earlier round"));
            }
        }
        let limit = self.settings.submission_change_limit;
        self.active_round_mut()?
            .submit(meme.into_meme(template_id), acting_user, limit)
    }

    /// Rate a meme of the active round. The meme lookup comes first so a stale
    /// id is reported as missing regardless of round state.
    pub fn rate_meme(
        &mut self,
        meme_id: MemeId,
        rating: NewRating,
        acting_user: &UserId,
    ) -> Result<Rating, DomainError> {
        if self.state == GameState::Finished {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game is finished",
            ));
        }
        let round = self.active_round_mut()?;
        if round.find_meme(&meme_id).is_none() {
            return Err(DomainError::meme_not_found());
        }
        let rating = Rating {
            score: rating.score,
            user_id: rating.user_id,
            meme_id,
        };
        round.rate(rating.clone(), acting_user)?;
        Ok(rating)
    }

    /// Close the submission window of `round`. Returns whether anything changed.
    pub fn close_round(&mut self, round: RoundNumber, now: OffsetDateTime) -> bool {
        if self.state != GameState::InProgress || round != self.current_round {
            return false;
        }
        match self.rounds.last_mut() {
            Some(active) => active.close(now),
            None => false,
        }
    }

    /// Finish `round` and move on: open the next one, or finish the game after
    /// the last. Stale round numbers and inactive games are ignored.
    pub fn advance(&mut self, round: RoundNumber, now: OffsetDateTime) -> bool {
        if self.state != GameState::InProgress || round != self.current_round {
            return false;
        }
        if let Some(active) = self.rounds.last_mut() {
            active.close(now);
        }

        if self.current_round < self.settings.max_rounds {
            self.current_round += 1;
            self.rounds.push(Round::opened(self.current_round, now));
        } else {
            self.state = GameState::Finished;
        }
        true
    }

    pub fn all_submitted(&self) -> bool {
        let Some(round) = self.active_round() else {
            return false;
        };
        !self.players.is_empty() && self.players.iter().all(|p| round.has_submitted(&p.user_id))
    }

    pub fn all_rated(&self) -> bool {
        let Some(round) = self.active_round() else {
            return false;
        };
        !round.is_open()
            && !self.players.is_empty()
            && self
                .players
                .iter()
                .all(|p| round.has_rated_all_others(&p.user_id))
    }

    /// Every rating of the game, in round order then insertion order.
    pub fn all_ratings(&self) -> Vec<Rating> {
        self.rounds
            .iter()
            .flat_map(|r| r.ratings_ref().iter().cloned())
            .collect()
    }

    pub fn lifecycle_view(&self) -> GameLifecycleView {
        GameLifecycleView {
            version: self.version,
            state: self.state,
            round: self.current_round,
            round_open: self.active_round().is_some_and(Round::is_open),
        }
    }
}
