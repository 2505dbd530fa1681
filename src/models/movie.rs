use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::non_empty;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    /// Comma separated, stored as entered.
    pub genres: String,
    pub year: i32,
}

/// Body of `POST /movies/add` and `PUT /movies/put/{id}`.
#[derive(Debug, Deserialize)]
pub struct MovieInput {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub genres: String,
    pub year: i32,
}

impl MovieInput {
    pub fn into_fields(self) -> Result<MovieFields, &'static str> {
        match (non_empty(self.title), non_empty(self.genres), self.year) {
            (Some(title), Some(genres), Some(year)) => Ok(MovieFields { title, genres, year }),
            _ => Err("title, genres and year are required"),
        }
    }
}
