pub mod db_todo_driven_ports;
pub mod memory_todo_driven_ports;

use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::{NewTodo, Todo};
use crate::external_connections;
use crate::external_connections::ConnectionHandle;
use anyhow::anyhow;
use db_todo_driven_ports::{DbTodoReader, DbTodoWriter};
use memory_todo_driven_ports::InMemoryTodoStore;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};

/// Data structure which owns clients for connecting to external systems.
/// Allows business logic to be agnostic of the external systems it communicates with
/// so driven adapters can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: Option<PgPool>,
}

impl ExternalConnectivity {
    /// Connectivity backed by a PostgreSQL connection pool
    pub fn new(db: PgPool) -> Self {
        ExternalConnectivity { db: Some(db) }
    }

    /// Connectivity for a process that keeps its data in memory
    pub fn without_database() -> Self {
        ExternalConnectivity { db: None }
    }
}

/// A handle from ExternalConnectivity which can connect to a database
pub struct PoolConnectionHandle {
    active_connection: PoolConnection<Postgres>,
}

impl ConnectionHandle for PoolConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection {
        &mut self.active_connection
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type DbHandle<'cxn_borrow> = PoolConnectionHandle;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error> {
        let Some(ref db) = self.db else {
            return Err(anyhow!("no database is configured for this process"));
        };
        let handle = PoolConnectionHandle {
            active_connection: db.acquire().await?,
        };

        Ok(handle)
    }
}

/// The persistence collaborator chosen when the process starts. Every operation is
/// forwarded to the selected backend.
#[derive(Clone)]
pub enum TodoStore {
    Database,
    InMemory(InMemoryTodoStore),
}

impl TodoStore {
    /// Name of the backend, used in startup logs
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Database => "postgres",
            Self::InMemory(_) => "in-memory",
        }
    }
}

impl TodoReader for TodoStore {
    async fn all_todos(
        &self,
        ext_cxn: &mut impl external_connections::ExternalConnectivity,
    ) -> Result<Vec<Todo>, anyhow::Error> {
        match self {
            Self::Database => DbTodoReader.all_todos(ext_cxn).await,
            Self::InMemory(store) => store.all_todos(ext_cxn).await,
        }
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl external_connections::ExternalConnectivity,
    ) -> Result<Option<Todo>, anyhow::Error> {
        match self {
            Self::Database => DbTodoReader.todo_by_id(todo_id, ext_cxn).await,
            Self::InMemory(store) => store.todo_by_id(todo_id, ext_cxn).await,
        }
    }
}

impl TodoWriter for TodoStore {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl external_connections::ExternalConnectivity,
    ) -> Result<Todo, anyhow::Error> {
        match self {
            Self::Database => DbTodoWriter.create_todo(new_todo, ext_cxn).await,
            Self::InMemory(store) => store.create_todo(new_todo, ext_cxn).await,
        }
    }

    async fn save_todo(
        &self,
        todo: &Todo,
        ext_cxn: &mut impl external_connections::ExternalConnectivity,
    ) -> Result<Todo, anyhow::Error> {
        match self {
            Self::Database => DbTodoWriter.save_todo(todo, ext_cxn).await,
            Self::InMemory(store) => store.save_todo(todo, ext_cxn).await,
        }
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl external_connections::ExternalConnectivity,
    ) -> Result<(), anyhow::Error> {
        match self {
            Self::Database => DbTodoWriter.delete_todo(todo_id, ext_cxn).await,
            Self::InMemory(store) => store.delete_todo(todo_id, ext_cxn).await,
        }
    }
}
