use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::validation::{validate, RuleSet};

/// JSON body that passed its [`RuleSet`] before being deserialized.
///
/// Checks run against the raw JSON so that wrong types and missing fields are
/// reported per field instead of as a single deserialization failure.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RuleSet,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if !body.is_object() {
            return Err(AppError::BadRequest(
                "request body must be a JSON object".into(),
            ));
        }

        let errors = validate(&body, T::RULES);
        if !errors.is_empty() {
            tracing::debug!(failed = errors.len(), "request body failed validation");
            return Err(AppError::Validation(errors));
        }

        serde_json::from_value(body)
            .map(ValidatedJson)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
