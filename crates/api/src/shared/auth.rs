use crate::error::SehatError;
use actix_web::{web, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sehat_saathi_domain::{User, ID};
use sehat_saathi_infra::SehatContext;
use serde::Deserialize;
use tracing::debug;

/// Claims of the tokens issued by the identity service. Older tokens
/// carry the user id as `id`, newer ones as `userId`.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    id: Option<String>,
}

impl Claims {
    fn subject(self) -> Option<String> {
        self.user_id.or(self.id)
    }
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.trim().is_empty() => Some(token.trim()),
        _ => None,
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(parse_bearer_token)
        .map(String::from)
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Websocket clients can not always set headers so the token is also
/// accepted as the `token` query parameter
fn query_token(req: &HttpRequest) -> Option<String> {
    web::Query::<TokenQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().token)
        .filter(|token| !token.is_empty())
}

pub fn decode_token(token: &str, secret: &str) -> Result<ID, SehatError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        debug!("Invalid token provided: {:?}", e);
        SehatError::Unauthorized("Not authorized, token failed".into())
    })?
    .claims;

    claims
        .subject()
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| SehatError::Unauthorized("Not authorized, token failed".into()))
}

async fn authenticate(token: Option<String>, ctx: &SehatContext) -> Result<User, SehatError> {
    let token = token.ok_or_else(|| SehatError::Unauthorized("Not authorized, no token".into()))?;
    let user_id = decode_token(&token, &ctx.config.jwt_secret)?;
    ctx.repos
        .users
        .find(&user_id)
        .await
        .ok_or_else(|| SehatError::Unauthorized("Not authorized, user not found".into()))
}

/// Resolves the `User` making the request from the bearer token
pub async fn protect_route(req: &HttpRequest, ctx: &SehatContext) -> Result<User, SehatError> {
    authenticate(bearer_token(req), ctx).await
}

/// Same as `protect_route` but also accepts the token as a query parameter
pub async fn protect_socket_route(
    req: &HttpRequest,
    ctx: &SehatContext,
) -> Result<User, SehatError> {
    authenticate(bearer_token(req).or_else(|| query_token(req)), ctx).await
}
