use std::sync::Arc;

use crate::config::app::AppConfig;
use crate::services::game_flow::GameFlowService;
use crate::services::lobbies::InMemoryLobbyService;

/// Application state shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<GameFlowService>,
    pub lobbies: Arc<InMemoryLobbyService>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        flow: Arc<GameFlowService>,
        lobbies: Arc<InMemoryLobbyService>,
        config: AppConfig,
    ) -> Self {
        Self {
            flow,
            lobbies,
            config,
        }
    }
}
