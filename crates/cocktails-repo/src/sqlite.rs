use async_trait::async_trait;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::{NewOrder, Order};
use cocktails_types::domain::user::{NewUser, User};
use cocktails_types::ports::{
    CocktailRepository, OrderRepository, RepoError, UserRepository,
};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Executor, FromRow, Row, SqlitePool};
use std::str::FromStr;

use crate::db_error;

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i32,
    order: String,
    price: i32,
}

impl From<DbOrder> for Order {
    fn from(row: DbOrder) -> Self {
        Order {
            id: row.id,
            order: row.order,
            price: row.price,
        }
    }
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

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database.
        let max_connections = if in_memory { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        pool.execute(ddl).await?;
        tracing::info!(database_url, "connected to SQLite");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// SQLite values carry their own storage class, so decode by trying each one.
fn row_to_cocktail(row: &SqliteRow) -> Cocktail {
    let mut columns = Map::new();
    for column in row.columns() {
        let i = column.ordinal();
        let value = if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
            v.map(Value::from)
        } else if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
            v.map(Value::from)
        } else if let Ok(v) = row.try_get::<Option<String>, _>(i) {
            v.map(Value::from)
        } else if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
            v.map(Value::from)
        } else {
            tracing::debug!(column = column.name(), "undecodable cocktail column");
            None
        };
        columns.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }
    Cocktail(columns)
}

#[async_trait]
impl CocktailRepository for SqliteRepo {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>, RepoError> {
        let rows = sqlx::query("SELECT * FROM cocktails")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.iter().map(row_to_cocktail).collect())
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        let created: DbOrder = sqlx::query_as(
            r#"INSERT INTO orders ("order", price) VALUES (?, ?) RETURNING id, "order", price"#,
        )
        .bind(order.order())
        .bind(order.price())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(created.into())
    }
}

#[async_trait]
impl UserRepository for SqliteRepo {
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        let row: DbUser = sqlx::query_as(
            "INSERT INTO users (email, password) VALUES (?, ?) RETURNING id, email, password",
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
            sqlx::query_as("SELECT id, email, password FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(User::from))
    }
}
