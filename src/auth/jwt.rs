use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which identity table an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Staff account (`user` table)
    User,
    /// Team owner (`owner` table)
    Owner,
}

/// Claims carried by the session token.
///
/// Staff tokens carry `role`; owner tokens carry `team_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Subject: account ID as a UUID string.
    pub sub: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    pub iat: i64,
}

impl SessionClaims {
    /// Claims for a staff session.
    #[must_use]
    pub fn staff(id: Uuid, email: &str, role: &str, ttl_secs: u64) -> Self {
        Self::new(id, email, AccountType::User, Some(role.to_string()), None, ttl_secs)
    }

    /// Claims for an owner session bound to their active team.
    #[must_use]
    pub fn owner(id: Uuid, email: &str, team_id: Uuid, ttl_secs: u64) -> Self {
        Self::new(id, email, AccountType::Owner, None, Some(team_id), ttl_secs)
    }

    fn new(
        id: Uuid,
        email: &str,
        account_type: AccountType,
        role: Option<String>,
        team_id: Option<Uuid>,
        ttl_secs: u64,
    ) -> Self {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX / 2);
        Self {
            sub: id.to_string(),
            email: email.to_string(),
            account_type,
            role,
            team_id,
            exp: now.saturating_add(ttl),
            iat: now,
        }
    }
}

/// Sign session claims into a compact HS256 token.
///
/// # Errors
///
/// Returns an error if JWT encoding fails.
pub fn encode_session(claims: &SessionClaims, secret: &str) -> anyhow::Result<String> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &key)
        .map_err(|e| anyhow::anyhow!("Failed to encode session token: {e}"))
}

/// Verify a session token's signature and expiry and return its claims.
///
/// # Errors
///
/// Returns an error if the token is malformed, tampered with, or expired.
pub fn decode_session(token: &str, secret: &str) -> anyhow::Result<SessionClaims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation)
        .map_err(|e| anyhow::anyhow!("Invalid session token: {e}"))?;

    Ok(token_data.claims)
}
