//! Domain layer: pure game logic types and helpers.

pub mod game;
pub mod game_transition;
pub mod ids;
pub mod lobby;
pub mod meme;
pub mod round;
pub mod settings;
pub mod template;
pub mod template_pick;

// Re-exports for ergonomics
pub use game::{Game, GameState, Player, Readiness};
pub use ids::{GameId, LobbyCode, MemeId, RoundNumber, TemplateId, UserId};
pub use lobby::{Lobby, LobbyMember};
pub use meme::{Meme, NewMeme, NewRating, Position, Rating, TextBox};
pub use round::Round;
pub use settings::GameSettings;
pub use template::Template;
