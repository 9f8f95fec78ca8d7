//! Handles settings for the application.
//!
//! Configuration is read from `settings.toml` (optional) and then overridden
//! by `MONEY__<SECTION>__<KEY>` environment variables, e.g.
//! `MONEY__AUTH__JWT_SECRET`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// `"memory"` or `{ sqlite = "path/to/file.db" }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_token_ttl_hours() -> i64 {
    engine::DEFAULT_TOKEN_TTL_HOURS
}

fn default_bcrypt_cost() -> u32 {
    engine::Bcrypt::DEFAULT_COST
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("MONEY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_fill_optional_keys() {
        let settings = parse(
            r#"
            [server]
            port = 3000
            database = "memory"

            [auth]
            jwt_secret = "secret"
            "#,
        );
        assert_eq!(settings.app.level, "info");
        assert!(matches!(settings.server.database, Database::Memory));
        assert_eq!(settings.auth.token_ttl_hours, 24);
        assert_eq!(settings.auth.bcrypt_cost, engine::Bcrypt::DEFAULT_COST);
    }

    #[test]
    fn sqlite_database_takes_a_path() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { sqlite = "money.db" }

            [auth]
            jwt_secret = "secret"
            token_ttl_hours = 2
            bcrypt_cost = 10
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.bind.as_deref(), Some("0.0.0.0"));
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "money.db"));
        assert_eq!(settings.auth.token_ttl_hours, 2);
        assert_eq!(settings.auth.bcrypt_cost, 10);
    }
}
