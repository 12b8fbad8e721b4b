//! Domain-level error type used across the round engine, the game aggregate,
//! repositories and collaborators.
//!
//! This error type is HTTP-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert with the
//! `From<DomainError> for AppError` implementation in `crate::error`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Business-rule violations that map to 400.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    RoundNotOpen,
    RoundStillOpen,
    GameNotStarted,
    GameFinished,
    InvalidSettings,
    PlayerAlreadyInLobby,
    PlayerKicked,
    PlayerNameMissing,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Lobby,
    Meme,
    Template,
    Player,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    LobbyFull,
    LobbyExists,
    /// Lobby already produced a game
    GameAlreadyCreated,
    DuplicateRating,
    SubmissionLimitReached,
    /// Stored aggregate moved on since it was loaded
    OptimisticLock,
    Other(String),
}

/// Operational failures of collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    TemplateSource,
    Storage,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with existing state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Acting on behalf of another identity
    Forbidden(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Forbidden(d) => write!(f, "forbidden: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    // Canonical errors shared by the engine and the services. The detail
    // strings are part of the public contract.

    pub fn game_not_found() -> Self {
        Self::not_found(NotFoundKind::Game, "Game not found")
    }
    pub fn lobby_not_found() -> Self {
        Self::not_found(NotFoundKind::Lobby, "Lobby not found")
    }
    pub fn meme_not_found() -> Self {
        Self::not_found(NotFoundKind::Meme, "Meme not found")
    }
    pub fn template_not_found() -> Self {
        Self::not_found(NotFoundKind::Template, "Template not found")
    }
    pub fn round_not_open() -> Self {
        Self::validation(ValidationKind::RoundNotOpen, "Round is not open")
    }
    pub fn round_still_open() -> Self {
        Self::validation(ValidationKind::RoundStillOpen, "Round is still open")
    }
    pub fn duplicate_rating() -> Self {
        Self::conflict(ConflictKind::DuplicateRating, "Meme already rated")
    }
}
