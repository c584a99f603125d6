use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::ErrorKind;
use crate::user::errors::UserError;

pub mod change_password;
pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level failure, one variant per [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(String),
    UnprocessableEntity(String),
    NotFound(String),
    Unauthorized(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::UnprocessableEntity(_) => ErrorKind::Unprocessable,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::InternalServerError(_) => ErrorKind::Internal,
        }
    }

    /// Not-found and business-rule failures share 422 on the wire.
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Unprocessable | ErrorKind::NotFound => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let message = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                "Internal server error".to_string()
            }
            ApiError::Validation(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        (status, Json(ApiErrorBody::new(status, kind, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => ApiError::Validation(message),
            ErrorKind::Unprocessable => ApiError::UnprocessableEntity(message),
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Unauthorized => ApiError::Unauthorized(message),
            ErrorKind::Internal => ApiError::InternalServerError(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub error: &'static str,
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, kind: ErrorKind, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            error: kind.as_str(),
            message,
        }
    }
}

/// Public view of a user; the password hash has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdResponseData {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::EmailError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(UserError::from(EmailError::InvalidFormat("x".to_string()))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(UserError::EmailAlreadyExists("a@x.com".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(UserError::NotFound("id".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(UserError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(UserError::DatabaseError("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_message_passes_through_verbatim() {
        assert_eq!(
            ApiError::from(UserError::EmailAlreadyExists("a@x.com".to_string())),
            ApiError::UnprocessableEntity("EMAIL_ALREADY_TAKEN".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized("Invalid old password".to_string())
        );
    }

    #[tokio::test]
    async fn test_internal_error_body_hides_detail() {
        let response =
            ApiError::InternalServerError("pool timed out on 10.0.0.3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["status_code"], 500);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Internal server error");
    }
}
