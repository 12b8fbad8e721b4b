use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::domain::MemeId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Meme id taken from the `{meme_id}` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemeIdParam(pub MemeId);

fn parse(req: &HttpRequest) -> Result<MemeIdParam, AppError> {
    let raw = req
        .match_info()
        .get("meme_id")
        .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing meme_id parameter"))?;
    let id = Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidId, format!("Invalid meme id: {raw}"))
    })?;
    Ok(MemeIdParam(MemeId(id)))
}

impl FromRequest for MemeIdParam {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}
