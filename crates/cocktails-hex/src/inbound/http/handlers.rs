use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::Order;
use cocktails_types::domain::user::UserView;
use cocktails_types::ports::Store;
use serde::{Deserialize, Serialize};

use super::extract::ValidatedJson;
use super::server::AppState;
use crate::errors::AppError;
use crate::validation::{Rule, RuleSet, CREDENTIAL_RULES, ORDER_RULES};

pub const LOGIN_OK: &str = "Login successful";

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub order: String,
    pub price: i32,
}

impl RuleSet for CreateOrderRequest {
    const RULES: &'static [Rule] = ORDER_RULES;
}

/// Body of both `/register` and `/login`.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl RuleSet for CredentialsRequest {
    const RULES: &'static [Rule] = CREDENTIAL_RULES;
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserView,
}

pub(super) async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub(super) async fn list_cocktails<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Cocktail>>, AppError>
where
    R: Store,
{
    let cocktails = state.cocktails.list_cocktails().await?;
    Ok(Json(cocktails))
}

pub(super) async fn create_order<R>(
    State(state): State<AppState<R>>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError>
where
    R: Store,
{
    let order = state
        .orders
        .create_order(payload.order, payload.price)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub(super) async fn register<R>(
    State(state): State<AppState<R>>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserView>), AppError>
where
    R: Store,
{
    let user = state.auth.register(payload.email, payload.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub(super) async fn login<R>(
    State(state): State<AppState<R>>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: Store,
{
    let user = state.auth.login(&payload.email, payload.password).await?;
    Ok(Json(LoginResponse {
        message: LOGIN_OK,
        user,
    }))
}
