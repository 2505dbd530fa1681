use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::TokenKeys,
    models::user::{LoginResponse, NewUser, RegisterResponse, User, UserRole},
    services::metrics::{LOGINS_COUNTER, REGISTRATIONS_COUNTER},
};

/// bcrypt is deliberately slow; keep it off the async workers.
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// A stored value that is not a bcrypt hash never matches.
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await?;
    Ok(valid)
}

pub struct AuthService;

impl AuthService {
    /// Hash the password and insert the user. There is no duplicate-email
    /// pre-check: the unique constraint decides, and a violation surfaces as
    /// a storage error.
    pub async fn register(pool: &PgPool, user: NewUser, cost: u32) -> AppResult<RegisterResponse> {
        let NewUser { email, gender, password, role } = user;
        let password_hash = hash_password(password, cost).await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO users (email, gender, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&email)
        .bind(gender.to_string())
        .bind(&password_hash)
        .bind(role.to_string())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            REGISTRATIONS_COUNTER.with_label_values(&["failed"]).inc();
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    tracing::warn!(%email, "registration rejected: email already registered");
                }
            }
            AppError::Database(e)
        })?;

        REGISTRATIONS_COUNTER.with_label_values(&["success"]).inc();
        tracing::info!(user_id = id, %role, "user registered");

        Ok(RegisterResponse { id, email, gender, role })
    }

    /// Check the credentials and issue a token carrying the stored email and role.
    pub async fn login(
        pool: &PgPool,
        keys: &TokenKeys,
        email: &str,
        password: &str,
    ) -> AppResult<LoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, gender, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        let Some(user) = user else {
            LOGINS_COUNTER.with_label_values(&["unknown_email"]).inc();
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), user.password.clone()).await? {
            LOGINS_COUNTER.with_label_values(&["bad_password"]).inc();
            return Err(AppError::InvalidCredentials);
        }

        let role: UserRole = user.role.parse()?;
        let token = keys.issue(&user.email, role)?;

        LOGINS_COUNTER.with_label_values(&["success"]).inc();
        tracing::info!(user_id = user.id, "login succeeded");

        Ok(LoginResponse {
            token,
            email: user.email,
            id: user.id,
            role,
        })
    }
}
