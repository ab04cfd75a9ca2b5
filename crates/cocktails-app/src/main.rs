use anyhow::Context;
use cocktails_hex::application::password::PasswordHasher;
use cocktails_hex::config::{Config, DatabaseConfig};
use cocktails_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use cocktails_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / DB_* / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo = open_repo(&config)
        .await
        .context("failed to connect to the database")?;
    tracing::info!(backend = repo.backend(), "store ready");

    let hasher = PasswordHasher::new(config.password_hash_cost)?;
    let state = AppState::new(repo, hasher);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(state, server_cfg).await?;
    http.run().await
}

async fn open_repo(config: &Config) -> anyhow::Result<Repo> {
    match &config.database {
        DatabaseConfig::Url(url) => Repo::connect(Some(url.as_str()), config.max_connections).await,
        #[cfg(feature = "postgres")]
        DatabaseConfig::Postgres(pg) => {
            let settings = cocktails_repo::PgSettings {
                host: pg.host.clone(),
                port: pg.port,
                user: pg.user.clone(),
                password: pg.password.clone(),
                database: pg.database.clone(),
                max_connections: config.max_connections,
            };
            cocktails_repo::build_postgres_repo(&settings).await
        }
        #[cfg(not(feature = "postgres"))]
        DatabaseConfig::Postgres(_) => anyhow::bail!("DB_HOST is set but the `postgres` feature is off"),
        DatabaseConfig::Local => build_repo(None).await,
    }
}
