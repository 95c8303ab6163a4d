//! Shapes of request and response bodies on the HTTP API

mod todo;

pub use todo::*;

use crate::domain::todo::TodoChanges;
use crate::routing_utils::BasicErrorResponse;
use utoipa::OpenApi;

/// Schemas shared by every API operation
#[derive(OpenApi)]
#[openapi(components(schemas(
    Todo,
    NewTodo,
    TodoChanges,
    DeletedTodo,
    BasicErrorResponse
)))]
pub struct OpenApiSchemas;
