use axum::{extract::State, Json};

use crate::{
    error::{AppError, AppResult},
    middleware::extract::{AppPath, AppQuery},
    models::{
        auth::AuthenticatedUser,
        pagination::{Page, PageQuery},
        user::UserSummary,
    },
    services::users::UserService,
    AppState,
};

/// GET /users — password hashes are never part of the listing.
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    Ok(Json(UserService::list_all(&state.db).await?))
}

/// GET /users/{page}
pub async fn list_users_page(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(page): AppPath<String>,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let page = Page::resolve(&page, &query).map_err(AppError::Validation)?;
    Ok(Json(UserService::list_page(&state.db, page).await?))
}
