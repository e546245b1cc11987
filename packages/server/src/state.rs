use std::sync::Arc;

use folio_common::Assets;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::guard::OwnerSecret;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub assets: Assets,
    pub owner_secret: Arc<OwnerSecret>,
}
