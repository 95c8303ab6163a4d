use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use derive_more::Display;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

/// A stored to-do item
#[derive(PartialEq, Eq, Debug, Clone, Display)]
#[display("todo {id} \"{title}\"")]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub done: bool,
}

/// Content of a to-do item which has not been assigned an ID yet
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub done: bool,
}

/// A set of changes bound onto an existing to-do item. Fields which are missing (or null)
/// in the incoming payload leave the stored value alone.
#[derive(Deserialize, ToSchema, PartialEq, Eq, Debug, Default)]
pub struct TodoChanges {
    #[schema(example = "buy milk")]
    pub title: Option<String>,
    #[schema(example = true)]
    pub done: Option<bool>,
}

impl TodoChanges {
    /// Parses a raw JSON request body into a set of changes
    pub fn from_json(raw_body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw_body)
    }

    /// Overwrites fields on the existing item. The item's ID never changes.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
    }
}

pub mod driven_ports {
    use super::*;

    /// Read side of the persistence collaborator
    pub trait TodoReader {
        /// Every stored item, in whatever order the store yields them
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;
    }

    /// Write side of the persistence collaborator
    pub trait TodoWriter {
        /// Stores a new item and returns it with its assigned ID
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;

        /// Writes the full record, inserting it if it's no longer present
        async fn save_todo(
            &self,
            todo: &Todo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;

        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("Todo {0} does not exist.")]
        NotFound(i32),
        #[error("{0}")]
        InvalidInput(String),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
        ) -> Result<Vec<Todo>, TodoError>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
        ) -> Result<Todo, TodoError>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl TodoWriter,
        ) -> Result<Todo, TodoError>;
        /// Looks up the item first, and only then parses `raw_changes`, so an unknown ID
        /// wins over a malformed body.
        async fn update_todo(
            &self,
            todo_id: i32,
            raw_changes: &[u8],
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
            todo_write: &impl TodoWriter,
        ) -> Result<Todo, TodoError>;
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
            todo_write: &impl TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl TodoService {
    async fn existing_todo(
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Todo, TodoError> {
        todo_read
            .todo_by_id(todo_id, &mut *ext_cxn)
            .await
            .context("looking up a todo by ID")?
            .ok_or(TodoError::NotFound(todo_id))
    }
}

impl driving_ports::TodoPort for TodoService {
    async fn all_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<Todo>, TodoError> {
        let todos = todo_read
            .all_todos(&mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Todo, TodoError> {
        Self::existing_todo(todo_id, &mut *ext_cxn, todo_read).await
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<Todo, TodoError> {
        let created = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;
        info!("Created {created}");

        Ok(created)
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        raw_changes: &[u8],
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<Todo, TodoError> {
        let mut todo = Self::existing_todo(todo_id, &mut *ext_cxn, todo_read).await?;
        let changes = TodoChanges::from_json(raw_changes)
            .map_err(|parse_err| TodoError::InvalidInput(parse_err.to_string()))?;
        changes.apply_to(&mut todo);

        let saved = todo_write
            .save_todo(&todo, &mut *ext_cxn)
            .await
            .context("saving an updated todo")?;

        Ok(saved)
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<(), TodoError> {
        let todo = Self::existing_todo(todo_id, &mut *ext_cxn, todo_read).await?;
        todo_write
            .delete_todo(todo.id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        info!("Deleted {todo}");

        Ok(())
    }
}
