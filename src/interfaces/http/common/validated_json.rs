//! Validated JSON extractor
//!
//! `ValidatedJson<T>` deserializes like `axum::Json<T>` and then runs
//! `validator::Validate::validate()`. Both malformed bodies and rule
//! violations are rejected with 400, the same status the domain uses for
//! its own validation errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(validator::ValidationErrors),
}

impl ValidatedJsonRejection {
    fn message(&self) -> String {
        match self {
            Self::Json(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::Invalid(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| match &e.message {
                            Some(m) => format!("{}: {}", field, m),
                            None => format!("{}: {}", field, e.code),
                        })
                    })
                    .collect();
                messages.sort();

                if messages.is_empty() {
                    "Validation failed".to_string()
                } else {
                    messages.join("; ")
                }
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.message());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}
