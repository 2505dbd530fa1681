use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(anyhow::anyhow!("Unknown role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Full row, including the bcrypt hash. Only the login path reads it.
/// Gender and role are TEXT columns guarded by CHECK constraints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub gender: String,
    pub role: String,
}

/// What `GET /users` returns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub gender: String,
    pub role: String,
}

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

/// A registration request that passed the presence checks.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub gender: Gender,
    pub password: String,
    pub role: UserRole,
}

impl RegisterRequest {
    pub fn into_new_user(self) -> Result<NewUser, String> {
        let email = non_empty(self.email).ok_or("email is required")?;
        let gender = self.gender.ok_or("gender is required")?;
        let password = non_empty(self.password).ok_or("password is required")?;
        let role = self.role.ok_or("role is required")?;
        Ok(NewUser { email, gender, password, role })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub email: String,
    pub gender: Gender,
    pub role: UserRole,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub id: i32,
    pub role: UserRole,
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
