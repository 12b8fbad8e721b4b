//! Lobby membership: the seam the game flow consumes plus a process-local
//! reference service behind the lobby routes.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::{GameId, GameSettings, Lobby, LobbyCode, LobbyMember, UserId};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;

/// What the game flow needs from lobby bookkeeping.
#[async_trait]
pub trait LobbyDirectory: Send + Sync {
    async fn find_lobby_by_code(&self, code: &LobbyCode) -> Result<Option<Lobby>, DomainError>;

    async fn notify_game_started(
        &self,
        code: &LobbyCode,
        game_id: &GameId,
        started_at: OffsetDateTime,
    ) -> Result<(), DomainError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLobbyService {
    lobbies: DashMap<LobbyCode, Lobby>,
}

/// Owner-only violations get their own code so clients can tell them apart
/// from acting-on-behalf-of errors.
fn owner_error(e: DomainError) -> AppError {
    match e {
        DomainError::Forbidden(detail) => AppError::forbidden(ErrorCode::NotLobbyOwner, detail),
        other => other.into(),
    }
}

impl InMemoryLobbyService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_lobby(
        &self,
        name: &str,
        owner: LobbyMember,
        settings: GameSettings,
    ) -> Result<Lobby, AppError> {
        self.create_lobby_with_code(LobbyCode::generate(), name, owner, settings)
    }

    pub fn create_lobby_with_code(
        &self,
        code: LobbyCode,
        name: &str,
        owner: LobbyMember,
        settings: GameSettings,
    ) -> Result<Lobby, AppError> {
        let lobby = Lobby::open(code.clone(), name, owner, settings)?;
        match self.lobbies.entry(code) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::LobbyExists,
                "Lobby already exists",
            )
            .into()),
            Entry::Vacant(slot) => {
                info!(lobby_code = %lobby.code, owner = %lobby.owner, "Lobby created");
                slot.insert(lobby.clone());
                Ok(lobby)
            }
        }
    }

    pub fn get_lobby(&self, code: &LobbyCode) -> Result<Lobby, AppError> {
        self.lobbies
            .get(code)
            .map(|l| l.value().clone())
            .ok_or_else(|| DomainError::lobby_not_found().into())
    }

    fn update<F>(&self, code: &LobbyCode, f: F) -> Result<Lobby, AppError>
    where
        F: FnOnce(&mut Lobby) -> Result<(), AppError>,
    {
        let mut slot = self
            .lobbies
            .get_mut(code)
            .ok_or_else(|| AppError::from(DomainError::lobby_not_found()))?;
        // Mutate a copy so a rejected change leaves the stored lobby untouched.
        let mut lobby = slot.value().clone();
        f(&mut lobby)?;
        *slot.value_mut() = lobby.clone();
        Ok(lobby)
    }

    pub fn join_lobby(&self, code: &LobbyCode, member: LobbyMember) -> Result<Lobby, AppError> {
        let user_id = member.user_id.clone();
        let lobby = self.update(code, |l| l.join(member).map_err(AppError::from))?;
        info!(lobby_code = %code, user_id = %user_id, "Player joined lobby");
        Ok(lobby)
    }

    pub fn kick_player(
        &self,
        code: &LobbyCode,
        actor: &UserId,
        target: &UserId,
    ) -> Result<Lobby, AppError> {
        let lobby = self.update(code, |l| l.kick(actor, target).map_err(owner_error))?;
        info!(lobby_code = %code, target = %target, "Player kicked from lobby");
        Ok(lobby)
    }

    pub fn update_settings(
        &self,
        code: &LobbyCode,
        actor: &UserId,
        settings: GameSettings,
    ) -> Result<Lobby, AppError> {
        self.update(code, |l| l.update_settings(actor, settings).map_err(owner_error))
    }
}

#[async_trait]
impl LobbyDirectory for InMemoryLobbyService {
    async fn find_lobby_by_code(&self, code: &LobbyCode) -> Result<Option<Lobby>, DomainError> {
        Ok(self.lobbies.get(code).map(|l| l.value().clone()))
    }

    async fn notify_game_started(
        &self,
        code: &LobbyCode,
        game_id: &GameId,
        started_at: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let mut lobby = self
            .lobbies
            .get_mut(code)
            .ok_or_else(DomainError::lobby_not_found)?;
        lobby.record_game_started(game_id.clone(), started_at);
        Ok(())
    }
}
