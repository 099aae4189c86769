/// Token service - issues and checks the JWTs that carry a `Caller`
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use viking_core::UserId;

/// The identity a request is made on behalf of
///
/// Built from a verified access token and handed explicitly to every
/// directory operation that needs to know who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: UserId,
    kind: TokenKind,
    iat: i64,
    exp: i64,
}

/// Access and refresh token handed out on login
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Clone)]
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: &str, access_hours: u64, refresh_days: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::hours(access_hours as i64),
            refresh_ttl: Duration::days(refresh_days as i64),
        }
    }

    /// Sign a token of the given kind for a user
    pub fn issue(&self, user_id: &UserId, kind: TokenKind) -> Result<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.clone(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding,
        )?)
    }

    pub fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
            token_type: "Bearer",
        })
    }

    /// Resolve an access token to the caller it was issued for
    pub fn authorize(&self, access_token: &str) -> Result<Caller> {
        let user_id = self.subject(access_token, TokenKind::Access)?;
        Ok(Caller { user_id })
    }

    /// Trade a refresh token for a fresh access token
    pub fn refresh(&self, refresh_token: &str) -> Result<String> {
        let user_id = self.subject(refresh_token, TokenKind::Refresh)?;
        self.issue(&user_id, TokenKind::Access)
    }

    fn subject(&self, token: &str, expected: TokenKind) -> Result<UserId> {
        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?.claims;

        if claims.kind != expected {
            return Err(ServerError::Auth(format!(
                "expected {expected:?} token, got {:?}",
                claims.kind
            )));
        }

        Ok(claims.sub)
    }
}
