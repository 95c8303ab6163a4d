//! HTTP service exposing CRUD operations over a single to-do resource. Storage is either
//! PostgreSQL or process memory, picked once when the process starts.

use axum::Router;
use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routing_utils;

/// Data shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub todo_store: persistence::TodoStore,
}

impl SharedData {
    /// Handler state backed by PostgreSQL
    pub fn with_database(db: sqlx::PgPool) -> Self {
        SharedData {
            ext_cxn: persistence::ExternalConnectivity::new(db),
            todo_store: persistence::TodoStore::Database,
        }
    }

    /// Handler state which keeps to-do items in memory
    pub fn in_memory(store: persistence::memory_todo_driven_ports::InMemoryTodoStore) -> Self {
        SharedData {
            ext_cxn: persistence::ExternalConnectivity::without_database(),
            todo_store: persistence::TodoStore::InMemory(store),
        }
    }
}

pub type AppState = State<Arc<SharedData>>;

/// Assembles every route, the API documentation and HTTP tracing into a ready-to-serve router
pub fn build_app(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation());

    logging::attach_tracing_http(router).with_state(shared_data)
}
