use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::auth::cookie::AUTH_COOKIE_NAME;
use crate::auth::jwt::{self, AccountType, SessionClaims};
use crate::entities::{StaffRole, owner, team, user};
use crate::error::AppError;
use crate::state::AppState;

/// Who is making the request, recovered from the session token.
///
/// Built once per request by the [`Session`] extractor and cached in the request
/// extensions, so every guard and handler sees the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentAccount {
    Anonymous,
    Staff {
        id: Uuid,
        email: String,
        role: StaffRole,
    },
    Owner {
        id: Uuid,
        email: String,
        team_id: Uuid,
    },
}

impl CurrentAccount {
    /// Decode a session token. A missing, malformed, tampered or expired token is
    /// simply "not logged in".
    #[must_use]
    pub fn from_token(token: Option<&str>, secret: &str) -> Self {
        let Some(token) = token else {
            return Self::Anonymous;
        };

        match jwt::decode_session(token, secret) {
            Ok(claims) => Self::from_claims(claims),
            Err(e) => {
                tracing::debug!("Ignoring session token: {e:#}");
                Self::Anonymous
            }
        }
    }

    fn from_claims(claims: SessionClaims) -> Self {
        let Ok(id) = claims.sub.parse::<Uuid>() else {
            return Self::Anonymous;
        };

        match claims.account_type {
            AccountType::User => claims
                .role
                .as_deref()
                .and_then(StaffRole::from_str)
                .map_or(Self::Anonymous, |role| Self::Staff {
                    id,
                    email: claims.email,
                    role,
                }),
            AccountType::Owner => claims.team_id.map_or(Self::Anonymous, |team_id| Self::Owner {
                id,
                email: claims.email,
                team_id,
            }),
        }
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Staff {
                role: StaffRole::Admin,
                ..
            }
        )
    }
}

/// Request-scoped session context. Never rejects; anonymous callers get
/// [`CurrentAccount::Anonymous`].
///
/// The token is read from the `auth_token` cookie, falling back to an
/// `Authorization: Bearer` header for API clients.
#[derive(Debug, Clone)]
pub struct Session(pub CurrentAccount);

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<CurrentAccount>() {
            return Ok(Self(account.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .map(str::to_string)
            });

        let account = CurrentAccount::from_token(token.as_deref(), &state.config.jwt_secret);
        parts.extensions.insert(account.clone());
        Ok(Self(account))
    }
}

/// Requires an active staff account (admin or auctioneer).
#[derive(Debug, Clone)]
pub struct StaffSession(pub user::Model);

impl StaffSession {
    /// Check that `account` is a staff account that still exists and is active.
    ///
    /// # Errors
    ///
    /// 401 when logged out or the account is gone, 403 for owner sessions.
    pub async fn resolve(db: &DatabaseConnection, account: &CurrentAccount) -> Result<Self, AppError> {
        let CurrentAccount::Staff { id, .. } = account else {
            return Err(if account.is_logged_in() {
                AppError::Forbidden("Staff account required.".to_string())
            } else {
                AppError::Unauthorized("Not logged in.".to_string())
            });
        };

        let staff = user::Entity::find_by_id(*id)
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session is no longer valid.".to_string()))?;

        Ok(Self(staff))
    }
}

impl FromRequestParts<AppState> for StaffSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Session(account)) = Session::from_request_parts(parts, state).await;
        Self::resolve(&state.db, &account).await
    }
}

/// Requires an active admin account.
#[derive(Debug, Clone)]
pub struct AdminSession(pub user::Model);

impl AdminSession {
    /// Like [`StaffSession::resolve`], additionally requiring the stored role to be admin.
    ///
    /// # Errors
    ///
    /// 401 when logged out or the account is gone, 403 for any non-admin.
    pub async fn resolve(db: &DatabaseConnection, account: &CurrentAccount) -> Result<Self, AppError> {
        let StaffSession(staff) = StaffSession::resolve(db, account).await?;

        // The stored role wins over the one baked into the token
        if StaffRole::from_str(&staff.role) != Some(StaffRole::Admin) {
            return Err(AppError::Forbidden("Admin role required.".to_string()));
        }

        Ok(Self(staff))
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Session(account)) = Session::from_request_parts(parts, state).await;
        Self::resolve(&state.db, &account).await
    }
}

/// Requires an active owner whose session team is still active.
#[derive(Debug, Clone)]
pub struct OwnerSession {
    pub owner: owner::Model,
    pub team: team::Model,
}

impl OwnerSession {
    /// Check that `account` is an owner session whose owner and team are both active.
    ///
    /// # Errors
    ///
    /// 401 when not logged in as an owner, 403 when the session's team is gone.
    pub async fn resolve(db: &DatabaseConnection, account: &CurrentAccount) -> Result<Self, AppError> {
        let CurrentAccount::Owner { id, team_id, .. } = account else {
            return Err(AppError::Unauthorized(
                "Login as a team owner to view your players".to_string(),
            ));
        };

        let owner = owner::Entity::find_by_id(*id)
            .filter(owner::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session is no longer valid.".to_string()))?;

        let team = team::Entity::find_by_id(*team_id)
            .filter(team::Column::OwnerId.eq(owner.id))
            .filter(team::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("No active team found for this owner".to_string())
            })?;

        Ok(Self { owner, team })
    }
}

impl FromRequestParts<AppState> for OwnerSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Session(account)) = Session::from_request_parts(parts, state).await;
        Self::resolve(&state.db, &account).await
    }
}
