use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sidecar metadata of a post. At most one row per post, removed with it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_meta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub post_id: i32,
    #[sea_orm(belongs_to, from = "post_id", to = "id")]
    pub post: HasOne<super::post::Entity>,

    /// Logo path relative to the blog page directory (`logos/intro.png`).
    pub logo: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
