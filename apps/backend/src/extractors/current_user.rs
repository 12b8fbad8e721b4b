use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::{LobbyMember, UserId};
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Acting identity, as asserted by the identity layer in front of us.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: Option<String>,
}

impl CurrentUser {
    pub fn as_member(&self) -> LobbyMember {
        LobbyMember {
            user_id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = header_str(req, USER_ID_HEADER)
            .map(|id| CurrentUser {
                id: UserId::from(id),
                name: header_str(req, USER_NAME_HEADER).map(str::to_string),
            })
            .ok_or_else(AppError::unauthorized);
        ready(user)
    }
}
