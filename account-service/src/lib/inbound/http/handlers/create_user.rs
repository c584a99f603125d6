use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use validator::Validate;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::RequestSchema;
use crate::inbound::http::extractors::ValidatedJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters"
    ))]
    name: String,

    #[validate(email(message = "Email must be a valid email"))]
    email: String,

    #[validate(length(
        min = 6,
        max = 32,
        message = "Password length must be between 6 and 32 characters"
    ))]
    password: String,

    #[validate(must_match(other = "password", message = "password not same"))]
    password_confirm: String,
}

impl RequestSchema for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "password", "password_confirm"];
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let name = Name::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateUserCommand::new(name, email, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub name: String,
    pub email: String,
}

impl From<&User> for CreateUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
