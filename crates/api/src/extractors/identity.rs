//! Caller identity extractor.
//!
//! Reads an optional `Authorization: Bearer <token>` header and turns it into a
//! [`RequestContext`]. A missing header yields an anonymous context so the
//! workflow layer decides whether the command needs a caller; a header that is
//! present but invalid is rejected here.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::{RequestContext, Role};
use shared::jwt::{extract_user_id, JwtConfig, JwtError};

use crate::app::AppState;
use crate::error::ApiError;

/// Request identity as seen by the workflow engine.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl Identity {
    /// Resolves an Authorization header value against the configured secret.
    pub fn from_header(jwt: &JwtConfig, header: Option<&str>) -> Result<Self, ApiError> {
        let header = match header {
            Some(value) => value,
            None => return Ok(Identity(RequestContext::anonymous())),
        };

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = jwt.validate_token(token).map_err(|e| match e {
            JwtError::TokenExpired => ApiError::Unauthorized("Token has expired".to_string()),
            _ => ApiError::Unauthorized("Invalid or expired token".to_string()),
        })?;

        let user_id = extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| ApiError::Unauthorized("Unknown role in token".to_string()))?;

        Ok(Identity(RequestContext::authenticated(user_id, role)))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .map(|v| {
                v.to_str()
                    .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))
            })
            .transpose()?;

        Self::from_header(&state.jwt, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn jwt() -> JwtConfig {
        JwtConfig::new("identity-extractor-test-secret", 3600).unwrap()
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        let Identity(ctx) = Identity::from_header(&jwt(), None).unwrap();
        assert!(ctx.actor.is_none());
    }

    #[test]
    fn test_valid_token_resolves_actor() {
        let jwt = jwt();
        let user_id = Uuid::new_v4();
        let (token, _) = jwt.generate_access_token(user_id, "club_moderator").unwrap();

        let header = format!("Bearer {}", token);
        let Identity(ctx) = Identity::from_header(&jwt, Some(&header)).unwrap();
        let actor = ctx.actor.unwrap();
        assert_eq!(actor.user_id, user_id);
        assert_eq!(actor.role, Role::ClubModerator);
    }

    #[test]
    fn test_malformed_header_rejected() {
        let result = Identity::from_header(&jwt(), Some("Token abc"));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = JwtConfig::new("some-other-identity-secret", 3600).unwrap();
        let (token, _) = other
            .generate_access_token(Uuid::new_v4(), "student")
            .unwrap();

        let header = format!("Bearer {}", token);
        let result = Identity::from_header(&jwt(), Some(&header));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let jwt = jwt();
        let (token, _) = jwt.generate_access_token(Uuid::new_v4(), "janitor").unwrap();

        let header = format!("Bearer {}", token);
        let result = Identity::from_header(&jwt, Some(&header));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
