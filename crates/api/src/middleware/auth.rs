//! JWT-based actor extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrail_core::actor::Actor;

use crate::auth::jwt::{validate_token, ACTOR_TYPE_DEALERSHIP, ACTOR_TYPE_INTERNAL};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated actor extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthActor) -> AppResult<Json<()>> {
///     let actor = auth.actor();
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthActor(pub Actor);

impl AuthActor {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let actor = match claims.actor_type.as_str() {
            ACTOR_TYPE_INTERNAL => Actor::internal(claims.sub),
            ACTOR_TYPE_DEALERSHIP => {
                let dealership_id = claims.dealership_id.ok_or_else(|| {
                    AppError::Unauthorized("Dealership token missing dealership_id".into())
                })?;
                Actor::dealership(claims.sub, dealership_id)
            }
            other => {
                return Err(AppError::Unauthorized(format!(
                    "Unknown actor type '{other}'"
                )))
            }
        };

        Ok(AuthActor(actor))
    }
}
