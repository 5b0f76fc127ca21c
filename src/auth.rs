use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::ApiError;

/// The authenticated actor for the current request, as resolved by the
/// upstream identity service and forwarded in the `X-User-Id` header.
///
/// The id is treated as an opaque user reference; requests without a usable
/// header are rejected before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentActor(pub i64);

impl FromRequest for CurrentActor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = req
            .headers()
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(CurrentActor);

        ready(actor.ok_or(ApiError::Unauthorized))
    }
}
