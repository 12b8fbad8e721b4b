// Unit tests for DomainError -> AppError mapping; no HTTP server involved.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let app: AppError = DomainError::round_not_open().into();
    assert_eq!(app.code(), ErrorCode::RoundNotOpen);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.detail(), "Round is not open");

    let app: AppError = DomainError::round_still_open().into();
    assert_eq!(app.code(), ErrorCode::RoundStillOpen);
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::validation(ValidationKind::Other("x".into()), "nope");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::BadRequest);
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::duplicate_rating().into();
    assert_eq!(app.code().as_str(), "DUPLICATE_RATING");
    assert_eq!(app.status().as_u16(), 409);

    let full = DomainError::conflict(ConflictKind::LobbyFull, "Lobby is full");
    let app: AppError = full.into();
    assert_eq!(app.code().as_str(), "LOBBY_FULL");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::game_not_found().into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.detail(), "Game not found");

    let app: AppError = DomainError::not_found(NotFoundKind::Player, "who").into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_forbidden_to_403() {
    let app: AppError = DomainError::forbidden("not yours").into();
    assert_eq!(app.code(), ErrorCode::Forbidden);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_infra() {
    let src = DomainError::infra(InfraErrorKind::TemplateSource, "imgflip down");
    let app: AppError = src.into();
    assert_eq!(app.code(), ErrorCode::TemplateSourceUnavailable);
    assert_eq!(app.status().as_u16(), 502);

    let storage = DomainError::infra(InfraErrorKind::Storage, "disk");
    let app: AppError = storage.into();
    assert_eq!(app.code(), ErrorCode::StorageError);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn humanized_titles() {
    assert_eq!(AppError::humanize_code("ROUND_NOT_OPEN"), "Round Not Open");
    assert_eq!(AppError::humanize_code("INTERNAL"), "Internal");
}
