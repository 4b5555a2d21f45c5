use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::dto::{PhotoUpload, RegistrationForm};
use crate::entities::{PlayerRole, player};
use crate::services::accounts::non_empty;
use crate::services::{SeasonService, ServiceError, ServiceResult};
use crate::storage::{ImagePayload, ImageStore, MAX_PHOTO_BYTES, PLAYER_PHOTO_FOLDER};

pub struct RegistrationService;

impl RegistrationService {
    /// Register a player for a season.
    ///
    /// Every check runs before the photo is uploaded, so a rejected form never
    /// leaves an image behind. `allow_late` lets admins register after the
    /// auction date.
    pub async fn register(
        db: &DatabaseConnection,
        images: &dyn ImageStore,
        form: RegistrationForm,
        now: DateTime<Utc>,
        allow_late: bool,
    ) -> ServiceResult<player::Model> {
        let required = [
            &form.name,
            &form.father_name,
            &form.phone,
            &form.role,
            &form.age,
            &form.address,
            &form.panchayat,
            &form.season_id,
        ];
        let photo = form.photo.as_ref().filter(|p| !p.bytes.is_empty());
        if required.iter().any(|v| v.trim().is_empty()) || photo.is_none() {
            return Err(ServiceError::MissingFields);
        }

        let age = form
            .age
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|a| *a > 0)
            .ok_or(ServiceError::InvalidAge)?;
        let phone = normalize_phone(&form.phone)?;
        let role = PlayerRole::from_str(&form.role).ok_or(ServiceError::InvalidRole)?;
        let payload = photo.map(photo_payload).transpose()?.ok_or(ServiceError::MissingFields)?;

        let season_id = form
            .season_id
            .trim()
            .parse::<Uuid>()
            .map_err(|_| ServiceError::SeasonNotFound)?;
        let season = SeasonService::find(db, season_id).await?;

        if !allow_late && !season.is_registration_open(now) {
            return Err(ServiceError::RegistrationClosed);
        }

        let existing = player::Entity::find()
            .filter(player::Column::Phone.eq(&phone))
            .filter(player::Column::SeasonId.eq(season.id))
            .filter(player::Column::IsActive.eq(true))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::DuplicateRegistration);
        }

        let photo_url = images
            .upload(&payload, PLAYER_PHOTO_FOLDER)
            .await
            .map_err(ServiceError::Storage)?;

        let stamp = now.fixed_offset();
        let created = player::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(form.name.trim().to_string()),
            father_name: Set(form.father_name.trim().to_string()),
            phone: Set(phone),
            age: Set(age),
            role: Set(role.as_str().to_string()),
            batting_style: Set(non_empty(form.batting_style)),
            bowling_style: Set(non_empty(form.bowling_style)),
            panchayat: Set(form.panchayat.trim().to_string()),
            address: Set(form.address.trim().to_string()),
            photo_url: Set(Some(photo_url)),
            season_id: Set(season.id),
            team_id: Set(None),
            price: Set(None),
            is_active: Set(true),
            created_at: Set(stamp),
            updated_at: Set(stamp),
        }
        .insert(db)
        .await?;

        tracing::info!(
            player_id = %created.id,
            season_id = %season.id,
            late = allow_late && !season.is_registration_open(now),
            "player registered"
        );
        Ok(created)
    }
}

/// Phone numbers are exactly ten digits, surrounding whitespace ignored.
pub(crate) fn normalize_phone(phone: &str) -> ServiceResult<String> {
    let phone = phone.trim();
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(phone.to_string())
    } else {
        Err(ServiceError::InvalidPhone)
    }
}

/// Check an uploaded photo's type and size and encode it for the image store.
pub(crate) fn photo_payload(photo: &PhotoUpload) -> ServiceResult<ImagePayload> {
    if !photo.content_type.starts_with("image/") {
        return Err(ServiceError::InvalidPhoto);
    }
    if photo.bytes.len() > MAX_PHOTO_BYTES {
        return Err(ServiceError::PhotoTooLarge);
    }
    Ok(ImagePayload::from_bytes(&photo.content_type, &photo.bytes))
}
