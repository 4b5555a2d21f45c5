use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::auth::jwt::SessionClaims;
use crate::auth::password;
use crate::config::BootstrapAdmin;
use crate::dto::{AccountSummary, CreateOwnerRequest, CreateUserRequest};
use crate::entities::{StaffRole, owner, team, user};
use crate::error::FieldError;
use crate::services::{ServiceError, ServiceResult};

/// An authenticated identity from either account table.
#[derive(Debug, Clone)]
pub enum Account {
    Staff(user::Model),
    /// Owners always log in bound to their oldest active team.
    Owner {
        owner: owner::Model,
        team: team::Model,
    },
}

impl Account {
    #[must_use]
    pub fn session_claims(&self, ttl_secs: u64) -> SessionClaims {
        match self {
            Self::Staff(u) => SessionClaims::staff(u.id, &u.email, &u.role, ttl_secs),
            Self::Owner { owner, team } => {
                SessionClaims::owner(owner.id, &owner.owner_email, team.id, ttl_secs)
            }
        }
    }

    /// `USER` or `OWNER`, as reported to the client.
    #[must_use]
    pub const fn account_type(&self) -> &'static str {
        match self {
            Self::Staff(_) => "USER",
            Self::Owner { .. } => "OWNER",
        }
    }

    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        match self {
            Self::Staff(u) => AccountSummary {
                id: u.id,
                name: u.name.clone(),
                role: Some(u.role.clone()),
                team_id: None,
            },
            Self::Owner { owner, team } => AccountSummary {
                id: owner.id,
                name: owner.owner_name.clone(),
                role: None,
                team_id: Some(team.id),
            },
        }
    }
}

pub struct AccountService;

impl AccountService {
    /// Log in against the staff table first, then the owner table.
    ///
    /// An active staff account with a wrong password fails outright; the owner
    /// table is only consulted when no active staff account has this email.
    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> ServiceResult<Account> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::CredentialsRequired);
        }
        let email = password::normalize_email(email);

        let staff = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await?;

        if let Some(staff) = staff {
            return if password::verify_password(password, &staff.password)? {
                Ok(Account::Staff(staff))
            } else {
                Err(ServiceError::InvalidCredentials)
            };
        }

        let owner = owner::Entity::find()
            .filter(owner::Column::OwnerEmail.eq(&email))
            .filter(owner::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &owner.owner_password)? {
            return Err(ServiceError::InvalidCredentials);
        }

        let team = team::Entity::find()
            .filter(team::Column::OwnerId.eq(owner.id))
            .filter(team::Column::IsActive.eq(true))
            .order_by_asc(team::Column::CreatedAt)
            .one(db)
            .await?
            .ok_or(ServiceError::NoActiveTeam)?;

        Ok(Account::Owner { owner, team })
    }

    pub async fn create_owner(
        db: &DatabaseConnection,
        req: CreateOwnerRequest,
    ) -> ServiceResult<owner::Model> {
        let mut errors = Vec::new();
        if req.owner_name.trim().chars().count() < 2 {
            errors.push(FieldError::new("ownerName", "Owner name must be at least 2 characters"));
        }
        if let Err(msg) = password::validate_email(&req.owner_email) {
            errors.push(FieldError::new("ownerEmail", msg));
        }
        if let Err(msg) = password::validate_password(&req.owner_password) {
            errors.push(FieldError::new("ownerPassword", msg));
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let email = password::normalize_email(&req.owner_email);
        let existing = owner::Entity::find()
            .filter(owner::Column::OwnerEmail.eq(&email))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Owner with this email already exists".to_string(),
            ));
        }

        let hash = password::hash_password(&req.owner_password)?;
        let created = owner::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_name: Set(req.owner_name.trim().to_string()),
            owner_email: Set(email),
            owner_phone: Set(non_empty(req.owner_phone)),
            owner_password: Set(hash),
            is_active: Set(true),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(db)
        .await?;

        tracing::info!(owner_id = %created.id, "owner created");
        Ok(created)
    }

    pub async fn create_user(
        db: &DatabaseConnection,
        req: CreateUserRequest,
    ) -> ServiceResult<user::Model> {
        let mut errors = Vec::new();
        if req.name.trim().chars().count() < 2 {
            errors.push(FieldError::new("name", "Name must be at least 2 characters"));
        }
        if let Err(msg) = password::validate_email(&req.email) {
            errors.push(FieldError::new("email", msg));
        }
        if let Err(msg) = password::validate_password(&req.password) {
            errors.push(FieldError::new("password", msg));
        }
        let role = StaffRole::from_str(&req.role);
        if role.is_none() {
            errors.push(FieldError::new("role", "Role must be ADMIN or AUCTIONEER"));
        }
        let Some(role) = role.filter(|_| errors.is_empty()) else {
            return Err(ServiceError::Validation(errors));
        };

        let email = password::normalize_email(&req.email);
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&email))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let created = insert_user(db, req.name.trim(), &email, &req.password, non_empty(req.phone), role)
            .await?;

        tracing::info!(user_id = %created.id, role = %role, "staff user created");
        Ok(created)
    }

    /// Create the first admin when there are no staff accounts at all.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_bootstrap_admin(
        db: &DatabaseConnection,
        admin: &BootstrapAdmin,
    ) -> ServiceResult<bool> {
        if user::Entity::find().count(db).await? > 0 {
            return Ok(false);
        }

        if let Err(msg) = password::validate_password(&admin.password) {
            return Err(ServiceError::Validation(vec![FieldError::new(
                "BOOTSTRAP_ADMIN_PASSWORD",
                msg,
            )]));
        }

        let email = password::normalize_email(&admin.email);
        let created =
            insert_user(db, "Administrator", &email, &admin.password, None, StaffRole::Admin)
                .await?;

        tracing::info!(user_id = %created.id, email = %created.email, "bootstrap admin created");
        Ok(true)
    }
}

async fn insert_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    plain_password: &str,
    phone: Option<String>,
    role: StaffRole,
) -> ServiceResult<user::Model> {
    let hash = password::hash_password(plain_password)?;
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password: Set(hash),
        phone: Set(phone),
        role: Set(role.as_str().to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await?;
    Ok(created)
}

/// Blank optional strings are stored as `NULL`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
