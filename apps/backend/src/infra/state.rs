use std::sync::Arc;

use crate::adapters::imgflip::ImgflipClient;
use crate::clock::{Clock, SystemClock};
use crate::config::app::AppConfig;
use crate::error::AppError;
use crate::repos::games::{GameRepository, InMemoryGames};
use crate::scheduler::PhaseQueue;
use crate::services::game_flow::GameFlowService;
use crate::services::lobbies::InMemoryLobbyService;
use crate::services::templates::TemplateSource;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: AppConfig,
    clock: Option<Arc<dyn Clock>>,
    games: Option<Arc<dyn GameRepository>>,
    lobbies: Option<Arc<InMemoryLobbyService>>,
    templates: Option<Arc<dyn TemplateSource>>,
    queue: Option<Arc<PhaseQueue>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            clock: None,
            games: None,
            lobbies: None,
            templates: None,
            queue: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_games(mut self, games: Arc<dyn GameRepository>) -> Self {
        self.games = Some(games);
        self
    }

    pub fn with_lobbies(mut self, lobbies: Arc<InMemoryLobbyService>) -> Self {
        self.lobbies = Some(lobbies);
        self
    }

    /// Replace the HTTP template catalog, e.g. with `StaticTemplates`.
    pub fn with_templates(mut self, templates: Arc<dyn TemplateSource>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_queue(mut self, queue: Arc<PhaseQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let templates: Arc<dyn TemplateSource> = match self.templates {
            Some(t) => t,
            None => Arc::new(ImgflipClient::new(
                self.config.template_api_url.clone(),
                self.config.template_fetch_timeout,
            )?),
        };
        let lobbies = self
            .lobbies
            .unwrap_or_else(|| Arc::new(InMemoryLobbyService::new()));
        let games = self
            .games
            .unwrap_or_else(|| Arc::new(InMemoryGames::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let queue = self.queue.unwrap_or_else(|| Arc::new(PhaseQueue::new()));

        let flow = GameFlowService::new(games, lobbies.clone(), templates, clock, queue);
        Ok(AppState::new(Arc::new(flow), lobbies, self.config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
