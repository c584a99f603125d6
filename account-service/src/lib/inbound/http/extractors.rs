use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;
use validator::ValidationErrors;

use super::handlers::ApiError;

/// Declarative shape of one operation's JSON body.
///
/// Field rules live in `#[validate(...)]` attributes; `FIELDS` fixes the
/// order in which violations are reported, so the first violated field in
/// declaration order determines the message.
pub trait RequestSchema: DeserializeOwned + Validate {
    const FIELDS: &'static [&'static str];
}

/// JSON body that has been deserialized and checked against its schema.
///
/// Runs before any handler logic. Malformed JSON, missing or mistyped fields
/// and rule violations are all rejected as validation failures.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestSchema,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(first_violation(&e, T::FIELDS)))?;

        Ok(ValidatedJson(value))
    }
}

fn first_violation(errors: &ValidationErrors, fields: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let mut ordered: Vec<(String, String)> = field_errors
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
        })
        .collect();

    let position = |field: &str| {
        fields
            .iter()
            .position(|declared| *declared == field)
            .unwrap_or(fields.len())
    };
    ordered.sort_by(|(a, _), (b, _)| position(a).cmp(&position(b)).then_with(|| a.cmp(b)));

    ordered
        .into_iter()
        .next()
        .map(|(_, message)| message)
        .unwrap_or_else(|| "Invalid request body".to_string())
}
