//! Application services: the game flow plus the collaborators it consumes.

pub mod game_flow;
pub mod game_locks;
pub mod lobbies;
pub mod templates;
