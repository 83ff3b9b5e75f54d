use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::claims::Identity;
use crate::auth::jwt::{JwtKeys, TokenError};
use crate::auth::repo_types::Role;
use crate::error::ApiError;

/// Extracts the bearer token from the `Authorization` header, verifies it and
/// hands the decoded identity to the handler. No token, no request.
#[derive(Debug)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthenticated)?;

        let claims = keys.verify(token).map_err(|e| match e {
            TokenError::Expired => ApiError::ExpiredToken,
            TokenError::Invalid => {
                warn!("invalid token");
                ApiError::InvalidToken
            }
        })?;

        Ok(AuthUser(claims.identity()))
    }
}

/// Same check as [`AuthUser`] plus an admin-role gate. No route in the current
/// surface is admin-only; task operations are owner-or-admin instead.
#[derive(Debug)]
pub struct AdminUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        if identity.role != Role::Admin {
            return Err(ApiError::forbidden("Admin access required"));
        }
        Ok(AdminUser(identity))
    }
}
