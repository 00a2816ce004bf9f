//! JWT encoding/validation for actor tokens.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use vitrail_core::types::DbId;

/// Actor type claim values.
pub const ACTOR_TYPE_DEALERSHIP: &str = "dealership";
pub const ACTOR_TYPE_INTERNAL: &str = "internal";

/// JWT configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret (`JWT_SECRET`).
    pub secret: String,
    /// Token lifetime in hours (`JWT_EXPIRY_HOURS`, default 24).
    pub expiry_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production".into());
        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");
        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Claims carried by an actor token.
///
/// `actor_type` discriminates dealership vs internal; `dealership_id` is
/// present only for dealership actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's internal database id.
    pub sub: DbId,
    pub actor_type: String,
    pub dealership_id: Option<DbId>,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Encode a token for a user. Used by tests and by the external identity
/// collaborator's provisioning tooling.
pub fn encode_token(
    user_id: DbId,
    actor_type: &str,
    dealership_id: Option<DbId>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now() + chrono::Duration::hours(config.expiry_hours);
    let claims = Claims {
        sub: user_id,
        actor_type: actor_type.to_string(),
        dealership_id,
        exp: exp.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token's signature and expiry, returning its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
