//! Authentication HTTP handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    IdentityResponse, SigninRequest, SignupRequest, TokenResponse, UserResponse,
};
use crate::state::AppState;

/// POST /auth/signup - Register a new account
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = state
        .auth_service
        .signup(&req.username, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/signin - Verify credentials and issue an access token
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.auth_service.signin(&req.email, &req.password).await?;

    Ok(Json(tokens))
}

/// GET /auth/me - Get the identity admitted from the bearer token
pub async fn me(user: AuthenticatedUser) -> Json<IdentityResponse> {
    Json(IdentityResponse { email: user.email })
}
