//! Lobby membership rules.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ids::{GameId, LobbyCode, UserId};
use super::settings::GameSettings;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyMember {
    pub user_id: UserId,
    pub name: Option<String>,
}

impl LobbyMember {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: Some(name.into()),
        }
    }

    fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    pub code: LobbyCode,
    pub name: String,
    pub owner: UserId,
    pub settings: GameSettings,
    players: Vec<LobbyMember>,
    kicked: Vec<UserId>,
    joinable: bool,
    pub game_id: Option<GameId>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub game_started_at: Option<OffsetDateTime>,
}

impl Lobby {
    /// Open a lobby with its owner seated first.
    pub fn open(
        code: LobbyCode,
        name: impl Into<String>,
        owner: LobbyMember,
        settings: GameSettings,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        let mut lobby = Self {
            code,
            name: name.into(),
            owner: owner.user_id.clone(),
            settings,
            players: Vec::new(),
            kicked: Vec::new(),
            joinable: true,
            game_id: None,
            game_started_at: None,
        };
        lobby.join(owner)?;
        Ok(lobby)
    }

    pub fn players(&self) -> &[LobbyMember] {
        &self.players
    }

    pub fn kicked(&self) -> &[UserId] {
        &self.kicked
    }

    pub fn is_joinable(&self) -> bool {
        self.joinable
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.settings.max_players as usize
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.players.iter().any(|p| &p.user_id == user)
    }

    pub fn join(&mut self, member: LobbyMember) -> Result<(), DomainError> {
        if !self.joinable || self.is_full() {
            return Err(DomainError::conflict(ConflictKind::LobbyFull, "Lobby is full"));
        }
        if self.kicked.contains(&member.user_id) {
            return Err(DomainError::validation(
                ValidationKind::PlayerKicked,
                "You cannot join again, you've been kicked.",
            ));
        }
        if self.contains(&member.user_id) {
            return Err(DomainError::validation(
                ValidationKind::PlayerAlreadyInLobby,
                "Player is already in the lobby",
            ));
        }
        if !member.has_name() {
            return Err(DomainError::validation(
                ValidationKind::PlayerNameMissing,
                "Player has no name set yet",
            ));
        }

        self.players.push(member);
        self.joinable = !self.is_full();
        Ok(())
    }

    /// Remove `target` and bar them from rejoining. Owner only.
    pub fn kick(&mut self, actor: &UserId, target: &UserId) -> Result<(), DomainError> {
        self.require_owner(actor)?;
        if actor == target {
            return Err(DomainError::validation(
                ValidationKind::Other("KICK_SELF".into()),
                "The owner cannot kick themselves",
            ));
        }
        let Some(idx) = self.players.iter().position(|p| &p.user_id == target) else {
            return Err(DomainError::not_found(
                crate::errors::domain::NotFoundKind::Player,
                "Player not found",
            ));
        };
        self.players.remove(idx);
        self.kicked.push(target.clone());
        self.joinable = !self.is_full();
        Ok(())
    }

    pub fn update_settings(
        &mut self,
        actor: &UserId,
        settings: GameSettings,
    ) -> Result<(), DomainError> {
        self.require_owner(actor)?;
        settings.validate()?;
        self.settings = settings;
        self.joinable = !self.is_full();
        Ok(())
    }

    pub fn record_game_started(&mut self, game_id: GameId, started_at: OffsetDateTime) {
        self.game_id = Some(game_id);
        self.game_started_at = Some(started_at);
    }

    fn require_owner(&self, actor: &UserId) -> Result<(), DomainError> {
        if actor != &self.owner {
            return Err(DomainError::forbidden(
                "Only the lobby owner may do that",
            ));
        }
        Ok(())
    }
}
