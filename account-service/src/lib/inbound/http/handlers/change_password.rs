use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use validator::Validate;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::RequestSchema;
use crate::inbound::http::extractors::ValidatedJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn change_password<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ChangePasswordRequest>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .user_service
        .change_password(&user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                ChangePasswordResponseData {
                    message: "Password updated successfully".to_string(),
                },
            )
        })
}

/// HTTP request body for rotating a password.
///
/// Field names are part of the public wire contract: `password_lama` is the
/// current password, `password_baru` the replacement.
#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(
        min = 6,
        max = 32,
        message = "Old password length must be between 6 and 32 characters"
    ))]
    password_lama: String,

    #[validate(length(
        min = 6,
        max = 32,
        message = "New password length must be between 6 and 32 characters"
    ))]
    password_baru: String,

    #[validate(must_match(other = "password_baru", message = "password not same"))]
    password_baru_confirm: String,
}

impl RequestSchema for ChangePasswordRequest {
    const FIELDS: &'static [&'static str] =
        &["password_lama", "password_baru", "password_baru_confirm"];
}

impl From<ChangePasswordRequest> for ChangePasswordCommand {
    fn from(body: ChangePasswordRequest) -> Self {
        ChangePasswordCommand::new(
            body.password_lama,
            body.password_baru,
            body.password_baru_confirm,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(old: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            password_lama: old.to_string(),
            password_baru: new.to_string(),
            password_baru_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("secret1", "secret2", "secret2").validate().is_ok());
        let longest = "a".repeat(32);
        assert!(request(&longest, &longest, &longest).validate().is_ok());
    }

    #[test]
    fn test_old_password_bounds() {
        let errors = request("abc", "secret2", "secret2").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_lama"));

        let errors = request(&"a".repeat(33), "secret2", "secret2")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password_lama"));
    }

    #[test]
    fn test_new_password_bounds() {
        let errors = request("secret1", "abc", "abc").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_baru"));

        let long = "a".repeat(33);
        let errors = request("secret1", &long, &long).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_baru"));
    }

    #[test]
    fn test_confirmation_mismatch() {
        let errors = request("secret1", "secret2", "secret3")
            .validate()
            .unwrap_err();
        let field_errors = errors.field_errors();
        assert!(field_errors.contains_key("password_baru_confirm"));
        assert!(!field_errors.contains_key("password_baru"));
    }

    #[test]
    fn test_into_command_keeps_field_roles() {
        let command: ChangePasswordCommand = request("secret1", "secret2", "secret3").into();
        assert_eq!(command.old_password, "secret1");
        assert_eq!(command.new_password, "secret2");
        assert_eq!(command.new_password_confirm, "secret3");
    }
}
