pub mod auth;
pub mod metrics;
pub mod movies;
pub mod users;
