use axum::{
    routing::{get, post},
    serve, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::handlers;
use crate::application::auth_service::AuthService;
use crate::application::cocktail_service::CocktailService;
use crate::application::order_service::OrderService;
use crate::application::password::PasswordHasher;
use cocktails_types::ports::Store;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

/// Services shared by every handler. All of them wrap the same store handle.
pub struct AppState<R: Store> {
    pub cocktails: Arc<CocktailService<R>>,
    pub orders: Arc<OrderService<R>>,
    pub auth: Arc<AuthService<R>>,
}

impl<R: Store> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            cocktails: self.cocktails.clone(),
            orders: self.orders.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<R: Store> AppState<R> {
    pub fn new(repo: R, hasher: PasswordHasher) -> Self {
        let repo = Arc::new(repo);
        Self {
            cocktails: Arc::new(CocktailService::new(repo.clone())),
            orders: Arc::new(OrderService::new(repo.clone())),
            auth: Arc::new(AuthService::new(repo, hasher)),
        }
    }
}

pub struct HttpServer<R>
where
    R: Store,
{
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

impl<R> HttpServer<R>
where
    R: Store,
{
    pub async fn new(state: AppState<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self { state, config })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        // The bar's frontend is served from elsewhere; allow any origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(handlers::health))
            .route("/cocktails", get(handlers::list_cocktails::<R>))
            .route("/orders", post(handlers::create_order::<R>))
            .route("/register", post(handlers::register::<R>))
            .route("/login", post(handlers::login::<R>))
            .layer(cors)
            .layer(trace_layer)
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}
