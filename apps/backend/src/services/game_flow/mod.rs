//! Game flow orchestration service - bridges the pure game aggregate with
//! storage, lobby bookkeeping, the template catalog and the phase scheduler.
//!
//! Every write goes through `run_mutation` (or `run_trigger` for deadlines),
//! which serializes per game, derives lifecycle transitions and turns them
//! into scheduler deadlines.

mod creation;
mod mutation;
mod player_actions;
mod queries;
mod round_lifecycle;

use std::sync::Arc;

use crate::clock::Clock;
use crate::repos::games::GameRepository;
use crate::scheduler::PhaseQueue;
use crate::services::game_locks::GameLocks;
use crate::services::lobbies::LobbyDirectory;
use crate::services::templates::TemplateSource;

pub use mutation::GameFlowMutationResult;

pub struct GameFlowService {
    games: Arc<dyn GameRepository>,
    lobbies: Arc<dyn LobbyDirectory>,
    templates: Arc<dyn TemplateSource>,
    clock: Arc<dyn Clock>,
    queue: Arc<PhaseQueue>,
    locks: GameLocks,
}

impl GameFlowService {
    pub fn new(
        games: Arc<dyn GameRepository>,
        lobbies: Arc<dyn LobbyDirectory>,
        templates: Arc<dyn TemplateSource>,
        clock: Arc<dyn Clock>,
        queue: Arc<PhaseQueue>,
    ) -> Self {
        Self {
            games,
            lobbies,
            templates,
            clock,
            queue,
            locks: GameLocks::new(),
        }
    }

    pub fn queue(&self) -> &Arc<PhaseQueue> {
        &self.queue
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
