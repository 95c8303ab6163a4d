use crate::domain::todo::TodoService;
use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{Json, NotFoundResponse, TodoErrorResponse};
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{MethodRouter, get};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_todos, create_todo, get_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the to-do API
pub struct TodoApi;
/// Constant used to group to-do endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Routes for the to-do collection and for individual items. The collection answers both with
/// and without a trailing slash.
pub fn todo_routes() -> Router<Arc<SharedData>> {
    let collection: MethodRouter<Arc<SharedData>> = get(|State(app_state): AppState| async move {
        let mut ext_cxn = app_state.ext_cxn.clone();

        list_todos(&mut ext_cxn, &TodoService {}, &app_state.todo_store).await
    })
    .post(
        |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
            let mut ext_cxn = app_state.ext_cxn.clone();

            create_todo(new_todo, &mut ext_cxn, &TodoService {}, &app_state.todo_store).await
        },
    );

    Router::new()
        .route("/todos", collection.clone())
        .route("/todos/", collection)
        .route(
            "/todos/:id",
            get(
                |State(app_state): AppState, Path(raw_todo_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();

                    get_todo(&raw_todo_id, &mut ext_cxn, &TodoService {}, &app_state.todo_store)
                        .await
                },
            )
            .put(
                |State(app_state): AppState,
                 Path(raw_todo_id): Path<String>,
                 raw_changes: Bytes| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let store = &app_state.todo_store;

                    update_todo(
                        &raw_todo_id,
                        &raw_changes,
                        &mut ext_cxn,
                        &TodoService {},
                        store,
                        store,
                    )
                    .await
                },
            )
            .delete(
                |State(app_state): AppState, Path(raw_todo_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let store = &app_state.todo_store;

                    delete_todo(&raw_todo_id, &mut ext_cxn, &TodoService {}, store, store).await
                },
            ),
        )
}

/// IDs arrive as strings; anything that isn't an integer can't name a stored item
fn parse_todo_id(raw_todo_id: &str) -> Result<i32, NotFoundResponse> {
    raw_todo_id.parse().map_err(|_| NotFoundResponse)
}

#[utoipa::path(
    get,
    path = "/todos/",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every stored to-do item", body = [dto::Todo]),
        (status = 500, description = "Storage could not be reached", body = BasicErrorResponse),
    ),
)]
/// Retrieves every to-do item
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    info!("Requested todos");
    let todos = todo_service
        .all_todos(&mut *ext_cxn, todo_read)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(todos.into_iter().map(dto::Todo::from).collect()))
}

#[utoipa::path(
    post,
    path = "/todos/",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "The created to-do item, with its assigned ID", body = dto::Todo),
        (status = 400, description = "Request body could not be bound", body = BasicErrorResponse,
            example = json!({"error": "Failed to deserialize the JSON body into the target type: title: invalid type: integer `5`, expected a string at line 1 column 11"})),
        (status = 500, description = "Storage could not be reached", body = BasicErrorResponse),
    ),
)]
/// Creates a to-do item
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_write: &impl TodoWriter,
) -> Result<(StatusCode, Json<dto::Todo>), ErrorResponse> {
    info!("Creating todo: {new_todo:?}");
    let created = todo_service
        .create_todo(&new_todo.into(), &mut *ext_cxn, todo_write)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok((StatusCode::CREATED, Json(dto::Todo::from(created))))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = TODO_API_GROUP,
    params(("id" = String, Path, description = "ID of the to-do item")),
    responses(
        (status = 200, description = "The requested to-do item", body = dto::Todo),
        (status = 404, description = "No such to-do item", body = BasicErrorResponse,
            example = json!({"error": "Todo not found"})),
        (status = 500, description = "Storage could not be reached", body = BasicErrorResponse),
    ),
)]
/// Retrieves a single to-do item
async fn get_todo(
    raw_todo_id: &str,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Get todo {raw_todo_id}");
    let todo_id = parse_todo_id(raw_todo_id)?;
    let todo = todo_service
        .todo_by_id(todo_id, &mut *ext_cxn, todo_read)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(todo.into()))
}

#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = TODO_API_GROUP,
    params(("id" = String, Path, description = "ID of the to-do item")),
    request_body = domain::todo::TodoChanges,
    responses(
        (status = 200, description = "The to-do item after the update", body = dto::Todo),
        (status = 400, description = "Request body could not be bound", body = BasicErrorResponse),
        (status = 404, description = "No such to-do item (checked before the body is read)", body = BasicErrorResponse,
            example = json!({"error": "Todo not found"})),
        (status = 500, description = "Storage could not be reached", body = BasicErrorResponse),
    ),
)]
/// Binds the request body onto an existing to-do item and saves it
async fn update_todo(
    raw_todo_id: &str,
    raw_changes: &[u8],
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    todo_write: &impl TodoWriter,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Updating todo {raw_todo_id}");
    let todo_id = parse_todo_id(raw_todo_id)?;
    let updated = todo_service
        .update_todo(todo_id, raw_changes, &mut *ext_cxn, todo_read, todo_write)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = TODO_API_GROUP,
    params(("id" = String, Path, description = "ID of the to-do item")),
    responses(
        (status = 200, description = "The to-do item was removed", body = dto::DeletedTodo),
        (status = 404, description = "No such to-do item", body = BasicErrorResponse,
            example = json!({"error": "Todo not found"})),
        (status = 500, description = "Storage could not be reached", body = BasicErrorResponse),
    ),
)]
/// Deletes a to-do item
async fn delete_todo(
    raw_todo_id: &str,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    todo_write: &impl TodoWriter,
) -> Result<Json<dto::DeletedTodo>, ErrorResponse> {
    info!("Deleting todo {raw_todo_id}");
    let todo_id = parse_todo_id(raw_todo_id)?;
    todo_service
        .delete_todo(todo_id, &mut *ext_cxn, todo_read, todo_write)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::DeletedTodo::confirmation()))
}
