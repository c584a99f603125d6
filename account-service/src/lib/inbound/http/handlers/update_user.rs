use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use super::ApiError;
use super::ApiSuccess;
use super::UserIdResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::RequestSchema;
use crate::inbound::http::extractors::ValidatedJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user.
///
/// Both fields are required even when only one of them changes.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters"
    ))]
    name: String,

    #[validate(email(message = "Email must be a valid email"))]
    email: String,
}

impl RequestSchema for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "email"];
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            name: Some(Name::new(self.name)?),
            email: Some(EmailAddress::new(self.email)?),
        })
    }
}

pub async fn update_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<ApiSuccess<UserIdResponseData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|user| {
            ApiSuccess::new(
                StatusCode::OK,
                UserIdResponseData {
                    id: user.id.to_string(),
                },
            )
        })
}
