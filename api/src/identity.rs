//! Caller identity extraction.
//!
//! Authentication is handled by an upstream gateway; by the time a request
//! reaches this service the verified account id is carried in the
//! `x-user-id` header. The extractor only parses it.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i64,
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .map(|id| CurrentUser { id })
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("missing or invalid {USER_ID_HEADER} header"))
            });
        ready(user)
    }
}
