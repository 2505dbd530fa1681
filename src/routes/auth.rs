use axum::{extract::State, Json};

use crate::{
    error::{AppError, AppResult},
    middleware::extract::AppJson,
    models::user::{non_empty, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    services::auth::AuthService,
    AppState,
};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let user = body.into_new_user().map_err(AppError::Validation)?;
    let created = AuthService::register(&state.db, user, state.config.bcrypt_cost).await?;
    Ok(Json(created))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (non_empty(body.email), non_empty(body.password)) else {
        return Err(AppError::Validation("email and password are required".into()));
    };

    let response = AuthService::login(&state.db, &state.tokens, &email, &password).await?;
    Ok(Json(response))
}
