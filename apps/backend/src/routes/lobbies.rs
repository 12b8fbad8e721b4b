//! Lobby HTTP routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::{GameSettings, LobbyCode, UserId};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateLobbyRequest {
    name: String,
    #[serde(default)]
    settings: GameSettings,
}

/// POST /api/lobbies
///
/// The caller becomes the owner and first player.
async fn create_lobby(
    user: CurrentUser,
    body: ValidatedJson<CreateLobbyRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let lobby = app_state
        .lobbies
        .create_lobby(&req.name, user.as_member(), req.settings)?;
    Ok(HttpResponse::Created().json(lobby))
}

/// GET /api/lobbies/{code}
async fn get_lobby(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let lobby = app_state.lobbies.get_lobby(&LobbyCode::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(lobby))
}

/// POST /api/lobbies/{code}/players
async fn join_lobby(
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let lobby = app_state
        .lobbies
        .join_lobby(&LobbyCode::new(path.into_inner()), user.as_member())?;
    Ok(HttpResponse::Ok().json(lobby))
}

/// DELETE /api/lobbies/{code}/players/{user_id}
async fn kick_player(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (code, target) = path.into_inner();
    let lobby = app_state.lobbies.kick_player(
        &LobbyCode::new(code),
        &user.id,
        &UserId::new(target),
    )?;
    Ok(HttpResponse::Ok().json(lobby))
}

/// PUT /api/lobbies/{code}/settings
async fn update_settings(
    path: web::Path<String>,
    user: CurrentUser,
    body: ValidatedJson<GameSettings>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let lobby = app_state.lobbies.update_settings(
        &LobbyCode::new(path.into_inner()),
        &user.id,
        body.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(lobby))
}

/// POST /api/lobbies/{code}/game
async fn start_game(
    path: web::Path<String>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state
        .flow
        .create_game(&LobbyCode::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(game))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_lobby)));
    cfg.service(web::resource("/{code}").route(web::get().to(get_lobby)));
    cfg.service(web::resource("/{code}/players").route(web::post().to(join_lobby)));
    cfg.service(web::resource("/{code}/players/{user_id}").route(web::delete().to(kick_player)));
    cfg.service(web::resource("/{code}/settings").route(web::put().to(update_settings)));
    cfg.service(web::resource("/{code}/game").route(web::post().to(start_game)));
}
