use serde::{Deserialize, Serialize};
use time::Duration;

use crate::errors::domain::{DomainError, ValidationKind};

/// Per-game knobs, configured on the lobby and copied into the game at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub max_players: u32,
    pub max_rounds: u32,
    /// Submission window per round, in seconds.
    pub round_duration_secs: u32,
    /// Rating window after a round closes, in seconds.
    pub rating_duration_secs: u32,
    /// How many times a player may replace their meme within one round.
    pub submission_change_limit: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_players: 6,
            max_rounds: 3,
            round_duration_secs: 60,
            rating_duration_secs: 30,
            submission_change_limit: 2,
        }
    }
}

impl GameSettings {
    pub fn round_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.round_duration_secs))
    }

    pub fn rating_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.rating_duration_secs))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let fail = |detail: &str| {
            Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                detail.to_string(),
            ))
        };
        if self.max_players == 0 {
            return fail("max_players must be at least 1");
        }
        if self.max_rounds == 0 {
            return fail("max_rounds must be at least 1");
        }
        if self.round_duration_secs == 0 {
            return fail("round_duration_secs must be positive");
        }
        if self.rating_duration_secs == 0 {
            return fail("rating_duration_secs must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_rounds_rejected() {
        let settings = GameSettings {
            max_rounds: 0,
            ..GameSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidSettings, _)
        ));
    }

    #[test]
    fn durations_convert_to_seconds() {
        let settings = GameSettings {
            round_duration_secs: 90,
            rating_duration_secs: 15,
            ..GameSettings::default()
        };
        assert_eq!(settings.round_duration(), Duration::seconds(90));
        assert_eq!(settings.rating_duration(), Duration::seconds(15));
    }
}
