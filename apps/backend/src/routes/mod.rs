use actix_web::web;

pub mod games;
pub mod health;
pub mod lobbies;

/// Register every route. Used by `main.rs` and by route tests alike.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Lobby routes: /api/lobbies/**
    cfg.service(web::scope("/api/lobbies").configure(lobbies::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
