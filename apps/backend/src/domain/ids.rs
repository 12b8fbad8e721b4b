//! Identifier newtypes. Cross-entity references are always one of these,
//! never a pointer into another aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Game session identity (ULID string for generated games).
    GameId
);
string_id!(
    /// User identity as handed to us by the identity provider.
    UserId
);
string_id!(
    /// Template identity as issued by the template catalog.
    TemplateId
);
string_id!(
    /// Lobby join code.
    LobbyCode
);

impl GameId {
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }
}

impl LobbyCode {
    pub fn generate() -> Self {
        Self(Ulid::new().to_string().to_lowercase())
    }
}

/// Globally unique meme identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemeId(pub Uuid);

impl MemeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 1-based round number; equals the round's position in the game.
pub type RoundNumber = u32;
