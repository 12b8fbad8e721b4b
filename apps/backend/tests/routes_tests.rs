// HTTP routes and middleware tests
//
// Drives the full actix app (routes + request tracing) over the in-memory
// harness and checks status codes, bodies and the problem-details contract.

mod common;
mod support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use meme_clash::domain::{Game, GameState, Lobby, Meme, Rating};
use meme_clash::middleware::request_trace::TRACE_HEADER;
use meme_clash::routes;
use meme_clash::RequestTrace;
use meme_clash_test_support::problem_details::assert_problem_details_from_service_response;
use meme_clash_test_support::unique_helpers::unique_user_id;
use serde_json::json;
use support::{settings, Harness};

async fn init_app(
    h: &Harness,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(h.state.clone()))
            .configure(routes::configure),
    )
    .await
}

fn as_user(req: test::TestRequest, id: &str) -> test::TestRequest {
    req.insert_header(("x-user-id", id))
        .insert_header(("x-user-name", id.to_uppercase()))
}

fn meme_body(owner: &str) -> serde_json::Value {
    json!({
        "user_id": owner,
        "color": "black",
        "font_size": 32,
        "text_boxes": [{ "text": "hello", "position": { "x": 0.5, "y": 0.2 } }]
    })
}

#[actix_web::test]
async fn health_reports_ok_with_trace_header() {
    let h = Harness::new();
    let app = init_app(&h).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(TRACE_HEADER));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["pending_deadlines"], 0);
}

#[actix_web::test]
async fn missing_game_renders_problem_details() {
    let h = Harness::new();
    let app = init_app(&h).await;

    let req = test::TestRequest::get().uri("/api/games/missing-id").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Game not found"),
    )
    .await;
}

#[actix_web::test]
async fn player_routes_require_an_identity() {
    let h = Harness::new();
    let game = h.started_game(&["alice"], settings(1)).await;
    let app = init_app(&h).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{}/ready", game.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let h = Harness::new();
    let game = h.started_game(&["alice"], settings(1)).await;
    let app = init_app(&h).await;

    let req = as_user(test::TestRequest::post(), "alice")
        .uri(&format!("/api/games/{}/templates/181913649/memes", game.id))
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert!(problem.detail.starts_with("Invalid JSON body"));
}

#[actix_web::test]
async fn invalid_meme_id_is_rejected() {
    let h = Harness::new();
    let game = h.started_game(&["alice"], settings(1)).await;
    let app = init_app(&h).await;

    let req = as_user(test::TestRequest::post(), "alice")
        .uri(&format!("/api/games/{}/memes/not-a-uuid/ratings", game.id))
        .set_json(json!({ "score": 3, "user_id": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn get_game_supports_conditional_requests() {
    let h = Harness::new();
    let game = h.started_game(&["alice"], settings(1)).await;
    let app = init_app(&h).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("etag")
        .to_string();
    let body: Game = test::read_body_json(resp).await;
    assert_eq!(body.id, game.id);
    assert!(etag.contains(&format!("v{}", game.version)));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

    // Any mutation invalidates the tag
    h.flow
        .set_player_ready(&game.id, &support::user("alice"))
        .await
        .unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((IF_NONE_MATCH, etag))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn lobby_to_first_rating_over_http() {
    let h = Harness::new();
    let app = init_app(&h).await;

    // Lobby
    let req = as_user(test::TestRequest::post(), "alice")
        .uri("/api/lobbies")
        .set_json(json!({ "name": "friday memes", "settings": {
            "max_players": 4, "max_rounds": 2, "round_duration_secs": 60,
            "rating_duration_secs": 30, "submission_change_limit": 1
        }}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let lobby: Lobby = test::read_body_json(resp).await;
    assert_eq!(lobby.owner, support::user("alice"));

    let req = as_user(test::TestRequest::post(), "bob")
        .uri(&format!("/api/lobbies/{}/players", lobby.code))
        .to_request();
    let lobby: Lobby = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lobby.players().len(), 2);

    // Game
    let req = as_user(test::TestRequest::post(), "alice")
        .uri(&format!("/api/lobbies/{}/game", lobby.code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let game: Game = test::read_body_json(resp).await;
    assert_eq!(game.state(), GameState::Creation);

    let req = as_user(test::TestRequest::put(), "alice")
        .uri(&format!("/api/games/{}/ready", game.id))
        .to_request();
    let game: Game = test::call_and_read_body_json(&app, req).await;
    assert_eq!(game.state(), GameState::InProgress);

    // Template then memes
    let req = as_user(test::TestRequest::get(), "alice")
        .uri(&format!("/api/games/{}/template", game.id))
        .to_request();
    let template: meme_clash::domain::Template = test::call_and_read_body_json(&app, req).await;

    let mut memes = Vec::new();
    for who in ["alice", "bob"] {
        let req = as_user(test::TestRequest::post(), who)
            .uri(&format!("/api/games/{}/templates/{}/memes", game.id, template.id))
            .set_json(meme_body(who))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let meme: Meme = test::read_body_json(resp).await;
        memes.push(meme);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/memes", game.id))
        .to_request();
    let listed: Vec<Meme> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, memes);

    // Rating bob's meme as alice
    let req = as_user(test::TestRequest::post(), "alice")
        .uri(&format!("/api/games/{}/memes/{}/ratings", game.id, memes[1].id))
        .set_json(json!({ "score": 5, "user_id": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rating: Rating = test::read_body_json(resp).await;
    assert_eq!(rating.meme_id, memes[1].id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/ratings", game.id))
        .to_request();
    let ratings: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ratings, vec![rating.clone()]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/ratings/all", game.id))
        .to_request();
    let all: Vec<Rating> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, vec![rating]);
}

#[actix_web::test]
async fn domain_errors_keep_their_codes_over_http() {
    let h = Harness::new();
    let game = h.started_game(&["alice", "bob"], settings(1)).await;
    let app = init_app(&h).await;

    // Rating while submissions are still open
    let meme = h
        .flow
        .create_meme(
            &game.id,
            support::template_id(),
            support::new_meme("alice", "x"),
            &support::user("alice"),
        )
        .await
        .unwrap();
    let req = as_user(test::TestRequest::post(), "bob")
        .uri(&format!("/api/games/{}/memes/{}/ratings", game.id, meme.id))
        .set_json(json!({ "score": 1, "user_id": "bob" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ROUND_STILL_OPEN",
        StatusCode::BAD_REQUEST,
        Some("Round is still open"),
    )
    .await;

    // Acting on behalf of someone else
    let req = as_user(test::TestRequest::post(), "bob")
        .uri(&format!(
            "/api/games/{}/templates/{}/memes",
            game.id,
            support::template_id()
        ))
        .set_json(meme_body("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "FORBIDDEN", StatusCode::FORBIDDEN, None)
        .await;
}

#[actix_web::test]
async fn lobby_owner_rules_over_http() {
    let h = Harness::new();
    let lobby = h.lobby(&["alice", "bob"], settings(1));
    let app = init_app(&h).await;

    let req = as_user(test::TestRequest::delete(), "bob")
        .uri(&format!("/api/lobbies/{}/players/alice", lobby.code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_LOBBY_OWNER",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;

    let req = as_user(test::TestRequest::delete(), "alice")
        .uri(&format!("/api/lobbies/{}/players/bob", lobby.code))
        .to_request();
    let kicked: Lobby = test::call_and_read_body_json(&app, req).await;
    assert!(!kicked.contains(&support::user("bob")));

    let req = as_user(test::TestRequest::post(), "bob")
        .uri(&format!("/api/lobbies/{}/players", lobby.code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PLAYER_KICKED",
        StatusCode::BAD_REQUEST,
        Some("You cannot join again, you've been kicked."),
    )
    .await;

    let req = as_user(test::TestRequest::put(), "alice")
        .uri(&format!("/api/lobbies/{}/settings", lobby.code))
        .set_json(json!({
            "max_players": 2, "max_rounds": 0, "round_duration_secs": 60,
            "rating_duration_secs": 30, "submission_change_limit": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_SETTINGS",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn ready_from_stranger_is_accepted() {
    let h = Harness::new();
    let game = h.started_game(&["alice"], settings(1)).await;
    let app = init_app(&h).await;

    let req = as_user(test::TestRequest::put(), &unique_user_id())
        .uri(&format!("/api/games/{}/ready", game.id))
        .to_request();
    let after: Game = test::call_and_read_body_json(&app, req).await;

    assert_eq!(after.players(), game.players());
    assert_eq!(after.version, game.version + 1);
}
