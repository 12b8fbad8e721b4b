use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::{Game, GameId};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::games;
use crate::scheduler::{PhaseJob, PhaseKind};
use crate::services::game_flow::GameFlowService;

#[derive(Debug)]
pub struct GameFlowMutationResult {
    pub final_game: Game,
    pub old_version: u64,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowMutationResult {
    pub fn final_version(&self) -> u64 {
        self.final_game.version
    }
}

impl GameFlowService {
    /// Apply `mutation` to one game under its write lock.
    ///
    /// The closure works on a copy; nothing is stored when it fails. On
    /// success the whole aggregate is saved (bumping its version even when
    /// the closure changed nothing) and deadlines are scheduled for any
    /// lifecycle transitions it caused.
    pub(super) async fn run_mutation<T, F>(
        &self,
        game_id: &GameId,
        mutation: F,
    ) -> Result<(T, GameFlowMutationResult), AppError>
    where
        F: FnOnce(&mut Game, OffsetDateTime) -> Result<T, DomainError>,
    {
        self.apply(game_id, mutation, |_| true).await
    }

    /// Like [`run_mutation`](Self::run_mutation) for scheduler triggers that
    /// report whether they changed anything. A `false` trigger is not saved,
    /// so stale or duplicate deliveries leave the version alone.
    pub(super) async fn run_trigger<F>(
        &self,
        game_id: &GameId,
        trigger: F,
    ) -> Result<(bool, GameFlowMutationResult), AppError>
    where
        F: FnOnce(&mut Game, OffsetDateTime) -> bool,
    {
        self.apply(game_id, |game, now| Ok(trigger(game, now)), |changed| *changed)
            .await
    }

    async fn apply<T, F, P>(
        &self,
        game_id: &GameId,
        mutation: F,
        persist: P,
    ) -> Result<(T, GameFlowMutationResult), AppError>
    where
        F: FnOnce(&mut Game, OffsetDateTime) -> Result<T, DomainError>,
        P: FnOnce(&T) -> bool,
    {
        // Unknown ids never reach the lock registry.
        games::require_game(self.games.as_ref(), game_id).await?;
        let _guard = self.locks.acquire(game_id).await;

        let game = games::require_game(self.games.as_ref(), game_id).await?;
        let before = game.lifecycle_view();
        let old_version = game.version;
        let now = self.clock.now();

        let mut working = game;
        let output = mutation(&mut working, now)?;

        if !persist(&output) {
            return Ok((
                output,
                GameFlowMutationResult {
                    final_game: working,
                    old_version,
                    transitions: Vec::new(),
                },
            ));
        }

        let after = working.lifecycle_view();
        let transitions = derive_game_transitions(&before, &after);

        let final_game = self.games.save(working).await?;
        self.schedule_transitions(&final_game, &transitions, now);

        Ok((
            output,
            GameFlowMutationResult {
                final_game,
                old_version,
                transitions,
            },
        ))
    }

    fn schedule_transitions(&self, game: &Game, transitions: &[GameTransition], now: OffsetDateTime) {
        for transition in transitions {
            match transition {
                GameTransition::GameStarted => {
                    info!(game_id = %game.id, players = game.players().len(), "Game started");
                }
                GameTransition::RoundOpened { round } => {
                    let due_at = now + game.settings.round_duration();
                    debug!(game_id = %game.id, round, %due_at, "Round opened");
                    self.queue.schedule(PhaseJob {
                        game_id: game.id.clone(),
                        round: *round,
                        kind: PhaseKind::SubmissionDeadline,
                        due_at,
                    });
                }
                GameTransition::SubmissionsClosed { round } => {
                    let due_at = now + game.settings.rating_duration();
                    debug!(game_id = %game.id, round, %due_at, "Submissions closed");
                    self.queue.schedule(PhaseJob {
                        game_id: game.id.clone(),
                        round: *round,
                        kind: PhaseKind::RatingDeadline,
                        due_at,
                    });
                }
                GameTransition::GameFinished => {
                    info!(game_id = %game.id, rounds = game.rounds().len(), "Game finished");
                }
            }
        }
    }
}
