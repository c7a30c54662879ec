use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, Cookie, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use util::config;

use crate::auth::claims::{AuthUser, Claims};

/// Name of the HttpOnly cookie the login endpoint sets.
pub const AUTH_COOKIE: &str = "admin-token";

/// Extracts `AuthUser` from a request.
///
/// The token is read from the `Authorization: Bearer` header, falling back to
/// the `admin-token` cookie set at login. Missing, malformed and expired
/// tokens all produce the same 401 so callers learn nothing about why a
/// credential was rejected.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer.token().to_owned(),
            Err(_) => TypedHeader::<Cookie>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|TypedHeader(cookies)| cookies.get(AUTH_COOKIE).map(str::to_owned))
                .ok_or((StatusCode::UNAUTHORIZED, "Authentication required"))?,
        };

        let token_data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Authentication required"))?;

        Ok(AuthUser(token_data.claims))
    }
}
