use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::IssueTokenCommand;
use crate::domain::user::models::PlaintextPassword;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn issue_token(
    State(state): State<AppState>,
    payload: Result<Json<IssueTokenRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    let Json(body) = payload.map_err(invalid_credentials)?;
    let email = EmailAddress::new(body.email).map_err(invalid_credentials)?;
    let password = PlaintextPassword::new(body.password).map_err(invalid_credentials)?;

    state
        .user_service
        .issue_token(IssueTokenCommand::new(email, password))
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, IssueTokenResponseData { token }))
}

// Malformed input is reported exactly like a failed login.
fn invalid_credentials<E>(_: E) -> ApiError {
    ApiError::from(UserError::InvalidCredentials)
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTokenRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTokenResponseData {
    pub token: String,
}
