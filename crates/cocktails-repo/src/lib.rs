#[cfg(not(any(feature = "memory", feature = "sqlite", feature = "postgres")))]
compile_error!("Enable a repo feature: `memory`, `sqlite` or `postgres`.");

use async_trait::async_trait;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::{NewOrder, Order};
use cocktails_types::domain::user::{NewUser, User};
use cocktails_types::ports::{
    CocktailRepository, OrderRepository, RepoError, UserRepository,
};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::PgSettings;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[cfg(all(not(feature = "memory"), feature = "sqlite"))]
const DEFAULT_SQLITE_URL: &str = "sqlite://cocktails.db";

/// The store selected at startup.
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
    #[cfg(feature = "postgres")]
    Postgres(postgres::PgRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::connect(url, DEFAULT_MAX_CONNECTIONS).await
}

#[cfg(feature = "postgres")]
pub async fn build_postgres_repo(settings: &PgSettings) -> anyhow::Result<Repo> {
    Ok(Repo::Postgres(postgres::PgRepo::from_settings(settings).await?))
}

impl Repo {
    /// Pick an adapter from the URL scheme. Without a URL the in-memory
    /// adapter is used when compiled in, otherwise a local SQLite file.
    pub async fn connect(url: Option<&str>, max_connections: u32) -> anyhow::Result<Self> {
        match url {
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                Self::postgres(url, max_connections).await
            }
            Some(url) if url.starts_with("sqlite:") => Self::sqlite(url).await,
            Some(url) => anyhow::bail!("unsupported database url scheme: {url}"),
            None => Self::local().await,
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        Ok(Self::Postgres(
            postgres::PgRepo::new(url, max_connections).await?,
        ))
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres(_url: &str, _max_connections: u32) -> anyhow::Result<Self> {
        anyhow::bail!("built without the `postgres` feature")
    }

    #[cfg(feature = "sqlite")]
    async fn sqlite(url: &str) -> anyhow::Result<Self> {
        Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn sqlite(_url: &str) -> anyhow::Result<Self> {
        anyhow::bail!("built without the `sqlite` feature")
    }

    #[cfg(feature = "memory")]
    async fn local() -> anyhow::Result<Self> {
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(not(feature = "memory"), feature = "sqlite"))]
    async fn local() -> anyhow::Result<Self> {
        Self::sqlite(DEFAULT_SQLITE_URL).await
    }

    #[cfg(not(any(feature = "memory", feature = "sqlite")))]
    async fn local() -> anyhow::Result<Self> {
        anyhow::bail!("no database url given and no local store compiled in")
    }
}

/// Forward a call to whichever adapter is live.
macro_rules! dispatch {
    ($self:ident, $repo:ident => $call:expr) => {
        match $self {
            #[cfg(feature = "memory")]
            Repo::Memory($repo) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite($repo) => $call,
            #[cfg(feature = "postgres")]
            Repo::Postgres($repo) => $call,
        }
    };
}

#[async_trait]
impl CocktailRepository for Repo {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>, RepoError> {
        dispatch!(self, repo => repo.list_cocktails().await)
    }
}

#[async_trait]
impl OrderRepository for Repo {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        dispatch!(self, repo => repo.insert_order(order).await)
    }
}

#[async_trait]
impl UserRepository for Repo {
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        dispatch!(self, repo => repo.insert_user(user).await)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        dispatch!(self, repo => repo.find_user_by_email(email).await)
    }
}

/// Unique violations become [`RepoError::Constraint`]; everything else keeps
/// the driver's message.
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub(crate) fn db_error(e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Constraint(db.message().to_string())
        }
        _ => RepoError::Db(e.to_string()),
    }
}
