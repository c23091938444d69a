//! Protected-request admission
//!
//! Extractor that hands the raw `Authorization` header to the auth gateway.
//! A handler taking `AuthenticatedUser` cannot run unless admission succeeded;
//! rejection short-circuits the request before any protected logic.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::auth::AuthService;
use crate::error::ApiError;

/// Identity admitted from a bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let identity = auth_service
            .admit(authorization)
            .map_err(|e| ApiError::from(e).into_response())?;

        Ok(AuthenticatedUser {
            email: identity.email,
        })
    }
}
