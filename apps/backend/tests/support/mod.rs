#![allow(dead_code)]

//! Shared harness: a fully wired game flow over in-memory collaborators and a
//! manual clock.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use meme_clash::clock::ManualClock;
use meme_clash::domain::{
    Game, GameSettings, Lobby, LobbyMember, NewMeme, NewRating, Position, Template, TemplateId,
    TextBox, UserId,
};
use meme_clash::infra::state::build_state;
use meme_clash::repos::games::InMemoryGames;
use meme_clash::scheduler::{PhaseQueue, PhaseRunner};
use meme_clash::services::game_flow::GameFlowService;
use meme_clash::services::lobbies::InMemoryLobbyService;
use meme_clash::services::templates::{StaticTemplates, TemplateSource};
use meme_clash::state::app_state::AppState;
use meme_clash_test_support::unique_helpers::unique_lobby_name;
use time::macros::datetime;
use time::OffsetDateTime;

pub const T0: OffsetDateTime = datetime!(2026-06-01 19:00 UTC);

pub fn user(id: &str) -> UserId {
    UserId::from(id)
}

pub fn catalog() -> Vec<Template> {
    [
        ("181913649", "Drake Hotline Bling", "https://i.imgflip.com/30b1gx.jpg"),
        ("87743020", "Two Buttons", "https://i.imgflip.com/1g8my4.jpg"),
        ("112126428", "Distracted Boyfriend", "https://i.imgflip.com/1ur9b0.jpg"),
    ]
    .into_iter()
    .map(|(id, name, url)| Template {
        id: TemplateId::from(id),
        image_url: url.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn template_id() -> TemplateId {
    TemplateId::from("181913649")
}

pub fn new_meme(owner: &str, caption: &str) -> NewMeme {
    NewMeme {
        id: None,
        user_id: user(owner),
        color: "white".to_string(),
        font_size: 28,
        text_boxes: vec![
            TextBox {
                text: caption.to_string(),
                position: Position { x: 0.5, y: 0.1 },
            },
            TextBox {
                text: "bottom text".to_string(),
                position: Position { x: 0.5, y: 0.9 },
            },
        ],
    }
}

pub fn vote(score: u8, by: &str) -> NewRating {
    NewRating {
        score,
        user_id: user(by),
    }
}

pub fn settings(max_rounds: u32) -> GameSettings {
    GameSettings {
        max_rounds,
        ..GameSettings::default()
    }
}

pub struct Harness {
    pub state: AppState,
    pub flow: Arc<GameFlowService>,
    pub clock: ManualClock,
    pub games: Arc<InMemoryGames>,
    pub lobbies: Arc<InMemoryLobbyService>,
    pub queue: Arc<PhaseQueue>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_templates(Arc::new(StaticTemplates::new(catalog())))
    }

    pub fn with_templates(templates: Arc<dyn TemplateSource>) -> Self {
        Self::with_games(Arc::new(InMemoryGames::new()), templates)
    }

    /// Share an existing store, e.g. to simulate a restart.
    pub fn with_games(games: Arc<InMemoryGames>, templates: Arc<dyn TemplateSource>) -> Self {
        let clock = ManualClock::new(T0);
        let lobbies = Arc::new(InMemoryLobbyService::new());
        let queue = Arc::new(PhaseQueue::new());

        let state = build_state()
            .with_clock(Arc::new(clock.clone()))
            .with_games(games.clone())
            .with_lobbies(lobbies.clone())
            .with_templates(templates)
            .with_queue(queue.clone())
            .build()
            .expect("build test state");

        Self {
            flow: state.flow.clone(),
            state,
            clock,
            games,
            lobbies,
            queue,
        }
    }

    /// Lobby owned by the first member, with the rest joined.
    pub fn lobby(&self, members: &[&str], settings: GameSettings) -> Lobby {
        let owner = LobbyMember::new(user(members[0]), members[0].to_uppercase());
        let lobby = self
            .lobbies
            .create_lobby(&unique_lobby_name("test"), owner, settings)
            .expect("create lobby");
        for m in &members[1..] {
            self.lobbies
                .join_lobby(&lobby.code, LobbyMember::new(user(m), m.to_uppercase()))
                .expect("join lobby");
        }
        self.lobbies.get_lobby(&lobby.code).expect("reload lobby")
    }

    /// Created and started: the owner's ready call starts the clock.
    pub async fn started_game(&self, members: &[&str], settings: GameSettings) -> Game {
        let lobby = self.lobby(members, settings);
        let game = self.flow.create_game(&lobby.code).await.expect("create game");
        self.flow
            .set_player_ready(&game.id, &user(members[0]))
            .await
            .expect("ready up")
    }

    pub fn runner(&self) -> PhaseRunner {
        PhaseRunner::new(self.flow.clone(), StdDuration::from_millis(10))
    }

    pub fn advance_clock(&self, secs: i64) {
        self.clock.advance(time::Duration::seconds(secs));
    }
}
