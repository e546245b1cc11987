//! Profile Repository: the single owner profile row.

use chrono::Utc;
use sea_orm::*;
use tracing::info;

use crate::entity::profile;

/// Editable profile text. Blank fields are stored as absent.
#[derive(Clone, Debug, Default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub direction: Option<String>,
    pub message: Option<String>,
    pub experience: Option<String>,
    pub awards: Option<String>,
}

impl ProfileFields {
    fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            direction: non_blank(self.direction),
            message: non_blank(self.message),
            experience: non_blank(self.experience),
            awards: non_blank(self.awards),
        }
    }
}

impl From<profile::Model> for ProfileFields {
    fn from(model: profile::Model) -> Self {
        Self {
            name: model.name,
            direction: model.direction,
            message: model.message,
            experience: model.experience,
            awards: model.awards,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The profile row, if one was ever saved.
pub async fn get<C: ConnectionTrait>(db: &C) -> Result<Option<profile::Model>, DbErr> {
    profile::Entity::find()
        .order_by_asc(profile::Column::Id)
        .one(db)
        .await
}

/// Stored profile fields, all absent when no row exists yet.
pub async fn fields<C: ConnectionTrait>(db: &C) -> Result<ProfileFields, DbErr> {
    Ok(get(db).await?.map(ProfileFields::from).unwrap_or_default())
}

/// Create the profile row or overwrite every field of it.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    fields: ProfileFields,
) -> Result<profile::Model, DbErr> {
    let fields = fields.normalized();
    let now = Utc::now();

    let model = match get(db).await? {
        Some(existing) => {
            let mut active: profile::ActiveModel = existing.into();
            active.name = Set(fields.name);
            active.direction = Set(fields.direction);
            active.message = Set(fields.message);
            active.experience = Set(fields.experience);
            active.awards = Set(fields.awards);
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            profile::ActiveModel {
                name: Set(fields.name),
                direction: Set(fields.direction),
                message: Set(fields.message),
                experience: Set(fields.experience),
                awards: Set(fields.awards),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    info!(profile_id = model.id, "Saved profile");
    Ok(model)
}
