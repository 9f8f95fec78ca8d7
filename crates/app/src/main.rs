use chrono::Duration;
use engine::{Bcrypt, JwtSigner};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "money={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let auth = settings.auth;

    let db = parse_database(&server.database).await?;
    let signer = JwtSigner::new(&auth.jwt_secret, Duration::hours(auth.token_ttl_hours))?;
    let engine = engine::Engine::builder()
        .database(db)
        .password_hasher(Bcrypt::new(auth.bcrypt_cost))
        .token_signer(signer)
        .build()
        .await?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
