pub mod auth;
pub mod health;
pub mod metrics;
pub mod movies;
pub mod users;

use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full HTTP surface. Every `/movies` and `/users` route sits
/// behind the `AuthenticatedUser` extractor.
pub fn router(state: AppState) -> Router {
    let tokens = state.tokens.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Auth
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Movies
        .route("/movies", get(movies::list_movies))
        .route("/movies/add", post(movies::add_movie))
        .route("/movies/del/{id}", delete(movies::delete_movie))
        .route("/movies/put/{id}", put(movies::update_movie))
        .route("/movies/{page}", get(movies::list_movies_page))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/{page}", get(users::list_users_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(tokens)),
        )
        .with_state(state)
}
