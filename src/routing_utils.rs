use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::todo::driving_ports::TodoError;

/// Message returned when a to-do item can't be addressed
pub const NOT_FOUND_MESSAGE: &str = "Todo not found";
/// Message returned when the persistence collaborator fails
pub const INTERNAL_ERROR_MESSAGE: &str = "Could not access data to complete your request";

/// Body of every failed API response
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct BasicErrorResponse {
    #[schema(example = "Todo not found")]
    pub error: String,
}

impl BasicErrorResponse {
    fn with_status(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            axum::Json(BasicErrorResponse {
                error: message.into(),
            }),
        )
            .into_response()
    }
}

/// Response type for a to-do item that doesn't exist (or an ID that could never exist)
pub struct NotFoundResponse;

impl IntoResponse for NotFoundResponse {
    fn into_response(self) -> Response {
        BasicErrorResponse::with_status(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }
}

/// Response type that wraps domain errors and turns them into [BasicErrorResponse]s
pub struct TodoErrorResponse(pub TodoError);

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TodoError::NotFound(_) => NotFoundResponse.into_response(),
            TodoError::InvalidInput(message) => {
                BasicErrorResponse::with_status(StatusCode::BAD_REQUEST, message)
            }
            TodoError::PortError(cause) => {
                error!("Persistence failure: {cause:#}");
                BasicErrorResponse::with_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE,
                )
            }
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing a request body that couldn't be bound. Always a 400, including
/// for a missing content type.
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        BasicErrorResponse::with_status(StatusCode::BAD_REQUEST, self.parse_problem)
    }
}
