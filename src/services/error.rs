use crate::error::FieldError;

/// Every named failure a service operation can report.
///
/// Business-rule and validation variants carry the exact message shown to the caller.
/// `Database`, `Storage` and `Internal` are infrastructure failures: their details are
/// logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("All required fields must be filled")]
    MissingFields,
    #[error("Invalid age")]
    InvalidAge,
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,
    #[error("Invalid player role")]
    InvalidRole,
    #[error("Player photo must be an image")]
    InvalidPhoto,
    #[error("Player photo exceeds the 5 MB size limit")]
    PhotoTooLarge,
    #[error("Player already registered for this season")]
    DuplicateRegistration,
    #[error("Registration is closed for this season")]
    RegistrationClosed,
    #[error("Season not found")]
    SeasonNotFound,
    #[error("No active season available")]
    NoActiveSeason,
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Team not found")]
    TeamNotFound,
    #[error("Owner not found")]
    OwnerNotFound,
    #[error("Invalid player price")]
    InvalidPrice,
    #[error("Invalid input")]
    InvalidInput,
    #[error("playerId is required")]
    PlayerIdRequired,
    #[error("Player is already sold; unassign first")]
    AlreadySold,
    #[error("Player is not sold")]
    NotSold,
    #[error("Phone number already in use")]
    PhoneInUse,
    #[error("Invalid tab")]
    InvalidTab,
    #[error("Email and password required")]
    CredentialsRequired,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No active team found for this owner")]
    NoActiveTeam,
    #[error("{0}")]
    InvalidSchedule(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Failed to upload player photo")]
    Storage(anyhow::Error),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Stable machine-readable code for the condition.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidAge => "INVALID_AGE",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidPhoto => "INVALID_PHOTO",
            Self::PhotoTooLarge => "PHOTO_TOO_LARGE",
            Self::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            Self::RegistrationClosed => "REGISTRATION_CLOSED",
            Self::SeasonNotFound => "SEASON_NOT_FOUND",
            Self::NoActiveSeason => "NO_ACTIVE_SEASON",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::OwnerNotFound => "OWNER_NOT_FOUND",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidInput => "INVALID_INPUT",
            Self::PlayerIdRequired => "PLAYER_ID_REQUIRED",
            Self::AlreadySold => "ALREADY_SOLD",
            Self::NotSold => "NOT_SOLD",
            Self::PhoneInUse => "PHONE_IN_USE",
            Self::InvalidTab => "INVALID_TAB",
            Self::CredentialsRequired => "CREDENTIALS_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NoActiveTeam => "NO_ACTIVE_TEAM",
            Self::InvalidSchedule(_) => "INVALID_SCHEDULE",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Database(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
