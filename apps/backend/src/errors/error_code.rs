//! Error codes for the meme-clash API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and appears verbatim in problem-details
//! bodies, so renaming one is a breaking change for clients.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity
    /// No acting identity on the request
    Unauthorized,
    /// Acting on behalf of another identity
    Forbidden,
    /// Only the lobby owner may do this
    NotLobbyOwner,

    // Request validation
    BadRequest,
    /// Malformed path or body identifier
    InvalidId,
    /// Lobby/game settings out of range
    InvalidSettings,
    /// Submission attempted while the round is closed
    RoundNotOpen,
    /// Rating attempted while the round still accepts submissions
    RoundStillOpen,
    /// Player action before the game left CREATION
    GameNotStarted,
    /// Player action after the game reached FINISHED
    GameFinished,
    PlayerAlreadyInLobby,
    PlayerKicked,
    PlayerNameMissing,

    // Not found
    GameNotFound,
    LobbyNotFound,
    MemeNotFound,
    TemplateNotFound,
    PlayerNotFound,
    NotFound,

    // Conflicts
    LobbyFull,
    LobbyExists,
    GameAlreadyCreated,
    DuplicateRating,
    SubmissionLimitReached,
    OptimisticLock,
    Conflict,

    // System
    /// Template catalog could not be fetched
    TemplateSourceUnavailable,
    StorageError,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical wire string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotLobbyOwner => "NOT_LOBBY_OWNER",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidSettings => "INVALID_SETTINGS",
            Self::RoundNotOpen => "ROUND_NOT_OPEN",
            Self::RoundStillOpen => "ROUND_STILL_OPEN",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::GameFinished => "GAME_FINISHED",
            Self::PlayerAlreadyInLobby => "PLAYER_ALREADY_IN_LOBBY",
            Self::PlayerKicked => "PLAYER_KICKED",
            Self::PlayerNameMissing => "PLAYER_NAME_MISSING",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::LobbyNotFound => "LOBBY_NOT_FOUND",
            Self::MemeNotFound => "MEME_NOT_FOUND",
            Self::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::LobbyFull => "LOBBY_FULL",
            Self::LobbyExists => "LOBBY_EXISTS",
            Self::GameAlreadyCreated => "GAME_ALREADY_CREATED",
            Self::DuplicateRating => "DUPLICATE_RATING",
            Self::SubmissionLimitReached => "SUBMISSION_LIMIT_REACHED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::TemplateSourceUnavailable => "TEMPLATE_SOURCE_UNAVAILABLE",
            Self::StorageError => "STORAGE_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
