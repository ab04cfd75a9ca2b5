use std::time::Duration;

use anyhow::Context;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::Order;
use cocktails_types::domain::user::UserView;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct CocktailsClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct CocktailsClient {
    base: Url,
    client: reqwest::Client,
}

/// Outcome of a login attempt. A 401 is an answer, not a transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(LoginResponse),
    InvalidCredentials,
}

impl CocktailsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<CocktailsClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(CocktailsClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn list_cocktails(&self) -> anyhow::Result<Vec<Cocktail>> {
        let res = self
            .client
            .get(self.url("cocktails")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn create_order(&self, req: CreateOrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("orders")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn register(&self, req: Credentials) -> anyhow::Result<UserView> {
        let res = self
            .client
            .post(self.url("register")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn login(&self, req: Credentials) -> anyhow::Result<LoginOutcome> {
        let res = self
            .client
            .post(self.url("login")?)
            .json(&req)
            .send()
            .await?;
        if res.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(email = %req.email, "login rejected");
            return Ok(LoginOutcome::InvalidCredentials);
        }
        let res = res.error_for_status()?;
        Ok(LoginOutcome::Success(res.json().await?))
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        self.client
            .get(self.url("health")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl CocktailsClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<CocktailsClient> {
        if let Some(client) = self.client {
            return Ok(CocktailsClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(CocktailsClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrderRequest {
    pub order: String,
    pub price: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
}
