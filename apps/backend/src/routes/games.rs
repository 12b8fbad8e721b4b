//! Game-related HTTP routes.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::{GameId, NewMeme, NewRating, TemplateId};
use crate::error::AppError;
use crate::extractors::{CurrentUser, MemeIdParam, ValidatedJson};
use crate::http::etag::{game_etag, if_none_match_hits};
use crate::state::app_state::AppState;

/// GET /api/games/{game_id}
///
/// Whole game with an ETag derived from its version. Honors `If-None-Match`.
async fn get_game(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.flow.get_game(&GameId::new(path.into_inner())).await?;
    let etag = game_etag(&game.id, game.version);

    let not_modified = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| if_none_match_hits(v, &etag));
    if not_modified {
        return Ok(HttpResponse::NotModified()
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok().insert_header((ETAG, etag)).json(game))
}

/// GET /api/games/{game_id}/template
async fn get_template(
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let template = app_state
        .flow
        .get_template(&GameId::new(path.into_inner()), &user.id)
        .await?;
    Ok(HttpResponse::Ok().json(template))
}

/// PUT /api/games/{game_id}/ready
async fn set_ready(
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state
        .flow
        .set_player_ready(&GameId::new(path.into_inner()), &user.id)
        .await?;
    Ok(HttpResponse::Ok().json(game))
}

/// POST /api/games/{game_id}/templates/{template_id}/memes
async fn create_meme(
    path: web::Path<(String, String)>,
    user: CurrentUser,
    body: ValidatedJson<NewMeme>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, template_id) = path.into_inner();
    let meme = app_state
        .flow
        .create_meme(
            &GameId::new(game_id),
            TemplateId::new(template_id),
            body.into_inner(),
            &user.id,
        )
        .await?;
    Ok(HttpResponse::Created().json(meme))
}

/// GET /api/games/{game_id}/memes
async fn get_memes(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let memes = app_state
        .flow
        .get_memes(&GameId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(memes))
}

/// POST /api/games/{game_id}/memes/{meme_id}/ratings
async fn create_rating(
    http_req: HttpRequest,
    meme_id: MemeIdParam,
    user: CurrentUser,
    body: ValidatedJson<NewRating>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = http_req.match_info().get("game_id").unwrap_or_default();
    let rating = app_state
        .flow
        .create_rating(
            &GameId::from(game_id),
            meme_id.0,
            body.into_inner(),
            &user.id,
        )
        .await?;
    Ok(HttpResponse::Created().json(rating))
}

/// GET /api/games/{game_id}/ratings
async fn get_round_ratings(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ratings = app_state
        .flow
        .get_ratings_from_round(&GameId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ratings))
}

/// GET /api/games/{game_id}/ratings/all
async fn get_all_ratings(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ratings = app_state
        .flow
        .get_all_ratings(&GameId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ratings))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/template").route(web::get().to(get_template)));
    cfg.service(web::resource("/{game_id}/ready").route(web::put().to(set_ready)));
    cfg.service(
        web::resource("/{game_id}/templates/{template_id}/memes")
            .route(web::post().to(create_meme)),
    );
    cfg.service(web::resource("/{game_id}/memes").route(web::get().to(get_memes)));
    cfg.service(
        web::resource("/{game_id}/memes/{meme_id}/ratings").route(web::post().to(create_rating)),
    );
    cfg.service(web::resource("/{game_id}/ratings").route(web::get().to(get_round_ratings)));
    cfg.service(web::resource("/{game_id}/ratings/all").route(web::get().to(get_all_ratings)));
}
