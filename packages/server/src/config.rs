use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared owner secret submitted on the login form.
    pub owner_password: String,
    /// HMAC key for session tokens.
    pub session_secret: String,
    pub session_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Shown on the about page when the profile has no name.
    pub owner_name: String,
    /// Root of the `home/`, `about/` and `blog/` asset trees.
    pub pages_dir: PathBuf,
    /// Upper bound for a single multipart request, in bytes.
    pub max_upload_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://data/site.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("auth.owner_password", "owner123")?
            .set_default("auth.session_secret", "dev-secret")?
            .set_default("auth.session_ttl_hours", 24 * 7)?
            .set_default("site.owner_name", "mxluo")?
            .set_default("site.pages_dir", "./pages")?
            .set_default("site.max_upload_size", 32 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., FOLIO__AUTH__OWNER_PASSWORD)
            .add_source(Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
