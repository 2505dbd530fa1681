use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::extract::{AppJson, AppPath, AppQuery},
    models::{
        auth::AuthenticatedUser,
        movie::{Movie, MovieInput},
        pagination::{Page, PageQuery},
    },
    services::movies::MovieService,
    AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("Movie not found".into())
}

/// GET /movies
pub async fn list_movies(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieService::list_all(&state.db).await?;
    Ok(Json(movies))
}

/// GET /movies/{page} — ten movies per page, `?page=N` overrides the path.
pub async fn list_movies_page(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(page): AppPath<String>,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let page = Page::resolve(&page, &query).map_err(AppError::Validation)?;
    let movies = MovieService::list_page(&state.db, page).await?;
    Ok(Json(movies))
}

/// POST /movies/add
pub async fn add_movie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(body): AppJson<MovieInput>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let fields = body
        .into_fields()
        .map_err(|m| AppError::Validation(m.to_string()))?;

    let movie = MovieService::create(&state.db, &fields).await?;
    tracing::info!(movie_id = movie.id, by = %user.email, "movie added");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// DELETE /movies/del/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    if !MovieService::delete(&state.db, id).await? {
        return Err(not_found());
    }

    tracing::info!(movie_id = id, by = %user.email, "movie deleted");
    Ok(Json(json!({ "message": "Movie deleted" })))
}

/// PUT /movies/put/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(body): AppJson<MovieInput>,
) -> AppResult<Json<Value>> {
    let fields = body
        .into_fields()
        .map_err(|m| AppError::Validation(m.to_string()))?;

    if !MovieService::update(&state.db, id, &fields).await? {
        return Err(not_found());
    }

    tracing::info!(movie_id = id, by = %user.email, "movie updated");
    Ok(Json(json!({ "message": "Movie updated" })))
}
