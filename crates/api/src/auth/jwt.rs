//! JWT access-token generation/validation and refresh-token helpers.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload that
//! carries everything the authorization layer needs (role, brand access,
//! per-brand permissions), so requests are authorized without a database
//! lookup. Claims reflect the user as of token issue time.
//!
//! Refresh tokens are opaque random strings. No server-side session store
//! exists, so they are never accepted back.

use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{
    encode_brand_access, encode_permission_claims, parse_brand_access, parse_permission_claims,
    AccessScope,
};
use brandpanel_core::types::DbId;
use brandpanel_db::models::user::User;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Display name.
    pub name: String,
    pub email: String,
    /// Role name (`super_admin`, `admin`, `editor`, `viewer`).
    pub role: String,
    /// Comma-joined brand ids the user may access, e.g. `"1,2"`.
    pub brand_access: String,
    /// One `"<brand_id>:<permission>"` entry per granted pair.
    pub permissions: Vec<String>,
    pub iss: String,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

impl Claims {
    /// Rebuild the authorization scope carried by the token.
    pub fn access_scope(&self) -> Result<AccessScope, CoreError> {
        Ok(AccessScope {
            role: self.role.parse()?,
            brand_access: parse_brand_access(&self.brand_access)?,
            permissions: parse_permission_claims(&self.permissions)?,
        })
    }
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
const DEFAULT_ISSUER: &str = "brandpanel";
const DEFAULT_AUDIENCE: &str = "brandpanel-admin";

/// Length of generated refresh tokens.
const REFRESH_TOKEN_LENGTH: usize = 64;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default            |
    /// |--------------------------|----------|--------------------|
    /// | `JWT_SECRET`             | **yes**  | --                 |
    /// | `JWT_ISSUER`             | no       | `brandpanel`       |
    /// | `JWT_AUDIENCE`           | no       | `brandpanel-admin` |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`               |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");
        assert!(
            access_token_expiry_mins > 0,
            "JWT_ACCESS_EXPIRY_MINS must be positive"
        );

        Self {
            secret,
            issuer,
            audience,
            access_token_expiry_mins,
        }
    }

    /// Access token lifetime in seconds, as reported in `expires_in`.
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user: &User,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        brand_access: encode_brand_access(&user.brand_access.0),
        permissions: encode_permission_claims(&user.permissions.0),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: now + config.access_token_expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry, issuer, and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Generate an opaque random refresh token.
pub fn generate_refresh_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use brandpanel_core::permissions::{PermissionMap, Resource};
    use brandpanel_core::roles::Role;
    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: "brandpanel".to_string(),
            audience: "brandpanel-admin".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    fn editor() -> User {
        let mut permissions = PermissionMap::new();
        permissions
            .entry(2)
            .or_default()
            .insert("pages.write".to_string());
        User {
            id: 7,
            name: "Eda Editor".to_string(),
            email: "eda@example.com".to_string(),
            password_hash: String::new(),
            role: "editor".to_string(),
            status: "active".to_string(),
            brand_access: Json(vec![1, 2]),
            permissions: Json(permissions),
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_claims_match_user_at_issue_time() {
        let config = test_config();
        let token = generate_access_token(&editor(), &config).expect("token generation");
        let claims = validate_token(&token, &config).expect("token validation");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.name, "Eda Editor");
        assert_eq!(claims.role, "editor");
        assert_eq!(claims.brand_access, "1,2");
        assert_eq!(claims.permissions, vec!["2:pages.write"]);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());

        let scope = claims.access_scope().unwrap();
        assert_eq!(scope.role, Role::Editor);
        assert!(scope.can_write(2, Resource::Pages));
        assert!(!scope.can_write(1, Resource::Pages));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            name: "x".into(),
            email: "x@example.com".into(),
            role: "viewer".into(),
            brand_access: String::new(),
            permissions: vec![],
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            // Well beyond the default 60-second leeway.
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };
        let token = generate_access_token(&editor(), &config_a).unwrap();
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_wrong_issuer_or_audience_fails() {
        let config = test_config();
        let token = generate_access_token(&editor(), &config).unwrap();

        let other_issuer = JwtConfig {
            issuer: "someone-else".into(),
            ..test_config()
        };
        let other_audience = JwtConfig {
            audience: "public-site".into(),
            ..test_config()
        };
        assert!(validate_token(&token, &other_issuer).is_err());
        assert!(validate_token(&token, &other_audience).is_err());
    }

    #[test]
    fn test_refresh_tokens_are_random_and_opaque() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_eq!(a.len(), REFRESH_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
