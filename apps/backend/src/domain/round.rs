//! Round engine: the mutable state of exactly one round and its invariants.
//!
//! A round accepts submissions while open, then ratings once closed. It never
//! reopens. The engine knows nothing about storage or time sources; callers
//! pass `now` in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ids::{MemeId, RoundNumber, UserId};
use super::meme::{Meme, Rating};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    number: RoundNumber,
    open: bool,
    /// When the submission timer started. Unset for round 1 until the game starts.
    #[serde(with = "time::serde::rfc3339::option")]
    opened_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    closed_at: Option<OffsetDateTime>,
    /// One meme per owner, in first-submission order.
    memes: Vec<Meme>,
    /// Replacements used per owner this round.
    changes: BTreeMap<UserId, u32>,
    ratings: Vec<Rating>,
}

impl Round {
    /// An open round whose submission timer has not started yet.
    pub fn pending(number: RoundNumber) -> Self {
        Self {
            number,
            open: true,
            opened_at: None,
            closed_at: None,
            memes: Vec::new(),
            changes: BTreeMap::new(),
            ratings: Vec::new(),
        }
    }

    /// An open round with its submission timer running from `now`.
    pub fn opened(number: RoundNumber, now: OffsetDateTime) -> Self {
        let mut round = Self::pending(number);
        round.opened_at = Some(now);
        round
    }

    pub fn number(&self) -> RoundNumber {
        self.number
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn opened_at(&self) -> Option<OffsetDateTime> {
        self.opened_at
    }

    pub fn closed_at(&self) -> Option<OffsetDateTime> {
        self.closed_at
    }

    /// Start the submission timer if it is not running yet.
    pub(crate) fn start_timer(&mut self, now: OffsetDateTime) {
        if self.opened_at.is_none() {
            self.opened_at = Some(now);
        }
    }

    /// Insert the actor's meme, or replace their earlier one in place.
    ///
    /// A replacement keeps the id of the first submission so references held
    /// by clients stay valid.
    pub fn submit(
        &mut self,
        mut meme: Meme,
        acting_user: &UserId,
        change_limit: u32,
    ) -> Result<Meme, DomainError> {
        if !self.open {
            return Err(DomainError::round_not_open());
        }
        if &meme.user_id != acting_user {
            return Err(DomainError::forbidden(
                "Cannot submit a meme on behalf of another player",
            ));
        }
        if self
            .memes
            .iter()
            .any(|m| m.id == meme.id && &m.user_id != acting_user)
        {
            return Err(DomainError::forbidden("Meme belongs to another player"));
        }

        match self.memes.iter().position(|m| &m.user_id == acting_user) {
            Some(idx) => {
                let used = self.changes.get(acting_user).copied().unwrap_or(0);
                if used >= change_limit {
                    return Err(DomainError::conflict(
                        ConflictKind::SubmissionLimitReached,
                        "Meme change limit reached",
                    ));
                }
                meme.id = self.memes[idx].id;
                self.changes.insert(acting_user.clone(), used + 1);
                self.memes[idx] = meme.clone();
            }
            None => self.memes.push(meme.clone()),
        }

        Ok(meme)
    }

    /// Close the round. Returns `false` when it was already closed.
    pub fn close(&mut self, now: OffsetDateTime) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.closed_at = Some(now);
        true
    }

    pub fn rate(&mut self, rating: Rating, acting_user: &UserId) -> Result<(), DomainError> {
        if &rating.user_id != acting_user {
            return Err(DomainError::forbidden(
                "Cannot rate on behalf of another player",
            ));
        }
        if self.open {
            return Err(DomainError::round_still_open());
        }
        if self.find_meme(&rating.meme_id).is_none() {
            return Err(DomainError::meme_not_found());
        }
        if self
            .ratings
            .iter()
            .any(|r| &r.user_id == acting_user && r.meme_id == rating.meme_id)
        {
            return Err(DomainError::duplicate_rating());
        }
        self.ratings.push(rating);
        Ok(())
    }

    pub fn find_meme(&self, meme_id: &MemeId) -> Option<&Meme> {
        self.memes.iter().find(|m| &m.id == meme_id)
    }

    pub fn memes(&self) -> Vec<Meme> {
        self.memes.clone()
    }

    pub fn ratings(&self) -> Vec<Rating> {
        self.ratings.clone()
    }

    pub(crate) fn ratings_ref(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn has_submitted(&self, user: &UserId) -> bool {
        self.memes.iter().any(|m| &m.user_id == user)
    }

    /// True once `user` has rated every meme they did not author.
    pub fn has_rated_all_others(&self, user: &UserId) -> bool {
        self.memes
            .iter()
            .filter(|m| &m.user_id != user)
            .all(|m| {
                self.ratings
                    .iter()
                    .any(|r| &r.user_id == user && r.meme_id == m.id)
            })
    }
}
