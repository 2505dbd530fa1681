use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::ConfigError;
use crate::error::AppError;
use crate::models::auth::{AuthenticatedUser, Claims};
use crate::models::user::UserRole;
use crate::services::metrics::AUTH_REJECTIONS_COUNTER;

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        else {
            AUTH_REJECTIONS_COUNTER.with_label_values(&["missing"]).inc();
            return Err(AppError::Unauthorized);
        };

        let keys = parts
            .extensions
            .get::<TokenKeys>()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("token keys not configured")))?;

        let claims = keys.verify(bearer_token(header)).map_err(|e| {
            // Expired and tampered tokens get the same response; only the log differs.
            tracing::debug!("rejected token: {e}");
            AUTH_REJECTIONS_COUNTER.with_label_values(&["invalid"]).inc();
            AppError::Unauthorized
        })?;

        Ok(claims.into())
    }
}

/// Accepts both `Bearer <token>` and a bare token as the header value.
/// Older clients send the token without a scheme.
pub fn bearer_token(value: &str) -> &str {
    match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    }
}

/// Signing and verification keys, built once at startup from the configured
/// secret. Carried through request extensions and `AppState`.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<KeysInner>,
}

struct KeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl_seconds", &self.inner.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Reject strictly after `exp`, no grace period.
        validation.leeway = 0;

        Ok(Self {
            inner: Arc::new(KeysInner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                validation,
                ttl_seconds,
            }),
        })
    }

    pub fn issue(&self, email: &str, role: UserRole) -> anyhow::Result<String> {
        self.issue_at(email, role, Utc::now().timestamp() as usize)
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, email: &str, role: UserRole, now: usize) -> anyhow::Result<String> {
        let exp = usize::try_from(self.inner.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| anyhow::anyhow!("token expiry overflows: ttl {}s", self.inner.ttl_seconds))?;
        let claims = Claims {
            email: email.to_string(),
            role,
            iat: now,
            exp,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", 12 * 60 * 60).unwrap()
    }

    fn now() -> usize {
        Utc::now().timestamp() as usize
    }

    async fn extract(
        keys: Option<TokenKeys>,
        header: Option<&str>,
    ) -> Result<AuthenticatedUser, AppError> {
        let mut builder = Request::builder().uri("/movies");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let mut request = builder.body(()).unwrap();
        if let Some(keys) = keys {
            request.extensions_mut().insert(keys);
        }
        let (mut parts, _) = request.into_parts();
        AuthenticatedUser::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(TokenKeys::new("", 60), Err(ConfigError::MissingSecret)));
        assert!(matches!(TokenKeys::new("  ", 60), Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let keys = keys();
        let issued_at = now();
        let token = keys.issue_at("a@b.com", UserRole::Admin, issued_at).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.iat, issued_at);
        assert_eq!(claims.exp, issued_at + 43_200);
    }

    #[test]
    fn token_valid_until_expiry() {
        let keys = TokenKeys::new("test-secret", 60).unwrap();
        // Expires in 30 seconds.
        let token = keys.issue_at("a@b.com", UserRole::User, now() - 30).unwrap();
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn token_accepted_at_exact_expiry() {
        let keys = TokenKeys::new("test-secret", 60).unwrap();
        // exp == now. Retry if the clock ticks over between issue and verify.
        for _ in 0..5 {
            let before = now();
            let token = keys.issue_at("a@b.com", UserRole::User, before - 60).unwrap();
            let result = keys.verify(&token);
            if now() == before {
                assert!(result.is_ok(), "token must be valid while now == exp");
                return;
            }
        }
        panic!("clock kept moving between issue and verify");
    }

    #[test]
    fn token_rejected_one_second_after_expiry() {
        let keys = TokenKeys::new("test-secret", 60).unwrap();
        // exp == now - 1.
        let token = keys.issue_at("a@b.com", UserRole::User, now() - 61).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret", 60).unwrap();
        // Expired 5 seconds ago.
        let token = keys.issue_at("a@b.com", UserRole::User, now() - 65).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn overflowing_expiry_is_an_error() {
        let keys = TokenKeys::new("test-secret", u64::MAX).unwrap();
        assert!(keys.issue("a@b.com", UserRole::User).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let other = TokenKeys::new("another-secret", 60).unwrap();
        let token = other.issue("a@b.com", UserRole::User).unwrap();
        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = keys();
        let token = keys.issue("a@b.com", UserRole::User).unwrap();
        let forged = keys.issue("a@b.com", UserRole::Admin).unwrap();

        // Swap the payload segment of a valid token for another one.
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;
        let tampered = parts.join(".");
        assert_ne!(tampered, forged);

        assert!(keys.verify(&tampered).is_err());
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(bearer_token("bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(bearer_token("abc.def.ghi"), "abc.def.ghi");
    }

    #[tokio::test]
    async fn extractor_accepts_raw_and_bearer_tokens() {
        let keys = keys();
        let token = keys.issue("a@b.com", UserRole::User).unwrap();

        let user = extract(Some(keys.clone()), Some(&token)).await.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.role, UserRole::User);

        let bearer = format!("Bearer {token}");
        assert!(extract(Some(keys), Some(&bearer)).await.is_ok());
    }

    #[tokio::test]
    async fn extractor_rejects_missing_and_invalid_tokens_alike() {
        let missing = extract(Some(keys()), None).await.unwrap_err();
        assert!(matches!(missing, AppError::Unauthorized));

        let foreign = TokenKeys::new("another-secret", 60)
            .unwrap()
            .issue("a@b.com", UserRole::User)
            .unwrap();
        let invalid = extract(Some(keys()), Some(&foreign)).await.unwrap_err();
        assert!(matches!(invalid, AppError::Unauthorized));

        let garbage = extract(Some(keys()), Some("not-a-token")).await.unwrap_err();
        assert!(matches!(garbage, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn extractor_without_keys_is_a_server_error() {
        let err = extract(None, Some("abc")).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
