use async_trait::async_trait;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::{NewOrder, Order};
use cocktails_types::domain::user::{NewUser, User};
use cocktails_types::ports::{
    CocktailRepository, OrderRepository, RepoError, UserRepository,
};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::db_error;

/// Discrete connection settings, as supplied through `DB_*` variables.
#[derive(Debug, Clone)]
pub struct PgSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl PgSettings {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// PostgreSQL adapter. The schema is owned by the database; see
/// `migrations/postgres.sql` for the shape this adapter expects.
pub struct PgRepo {
    pool: PgPool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i32,
    order: String,
    price: i32,
}

#[derive(FromRow)]
struct DbUser {
    id: i32,
    email: String,
    password: String,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password,
        }
    }
}

impl PgRepo {
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = PgConnectOptions::from_str(database_url)?;
        Self::connect_with(options, max_connections).await
    }

    pub async fn from_settings(settings: &PgSettings) -> anyhow::Result<Self> {
        Self::connect_with(settings.connect_options(), settings.max_connections).await
    }

    async fn connect_with(options: PgConnectOptions, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        tracing::info!(max_connections, "connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CocktailRepository for PgRepo {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>, RepoError> {
        // Let the server render each row so arbitrary column types survive.
        let rows: Vec<(Value,)> = sqlx::query_as("SELECT row_to_json(c) FROM cocktails c")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        rows.into_iter()
            .map(|(row,)| match row {
                Value::Object(columns) => Ok(Cocktail(columns)),
                other => Err(RepoError::Db(format!("unexpected cocktail row: {other}"))),
            })
            .collect()
    }
}

#[async_trait]
impl OrderRepository for PgRepo {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        let row: DbOrder = sqlx::query_as(
            r#"INSERT INTO orders ("order", price) VALUES ($1, $2) RETURNING id, "order", price"#,
        )
        .bind(order.order())
        .bind(order.price())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(Order {
            id: row.id,
            order: row.order,
            price: row.price,
        })
    }
}

#[async_trait]
impl UserRepository for PgRepo {
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        let row: DbUser = sqlx::query_as(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, password",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as("SELECT id, email, password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(User::from))
    }
}
