use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use super::claims::SessionClaims;
use crate::error::AppError;

/// Identity of the requester as established by the authentication
/// middleware. `Identity(None)` is an anonymous request; never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub Option<SessionClaims>);

impl Identity {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.sub.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Identity(req.extensions().get::<SessionClaims>().cloned())))
    }
}

/// Signed-in user; rejects anonymous requests with `Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SessionClaims>()
            .map(|claims| CurrentUser {
                id: claims.sub.clone(),
                email: claims.email.clone(),
            })
            .ok_or_else(AppError::unauthorized);
        ready(user)
    }
}
