//! Keeps to-do items in process memory. Each operation is atomic on its own, but nothing orders
//! a lookup against a later save from another request.

use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::{NewTodo, Todo};
use crate::external_connections::ExternalConnectivity;
use anyhow::{Error, anyhow};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct StoredTodos {
    todos: Vec<Todo>,
    highest_todo_id: i32,
}

/// Driven adapter which stores to-do items in a shared vector. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    stored: Arc<RwLock<StoredTodos>>,
}

impl InMemoryTodoStore {
    pub fn new() -> InMemoryTodoStore {
        Self::default()
    }

    /// Seeds the store, assigning IDs starting from 1 in slice order
    pub fn new_with_todos(todos: &[NewTodo]) -> InMemoryTodoStore {
        let todos: Vec<Todo> = todos
            .iter()
            .zip(1..)
            .map(|(new_todo, id)| todo_from_create(id, new_todo))
            .collect();
        let stored = StoredTodos {
            highest_todo_id: todos.last().map_or(0, |todo| todo.id),
            todos,
        };

        InMemoryTodoStore {
            stored: Arc::new(RwLock::new(stored)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoredTodos>, Error> {
        self.stored
            .read()
            .map_err(|_| anyhow!("in-memory todo store lock was poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoredTodos>, Error> {
        self.stored
            .write()
            .map_err(|_| anyhow!("in-memory todo store lock was poisoned"))
    }
}

fn todo_from_create(todo_id: i32, new_todo: &NewTodo) -> Todo {
    Todo {
        id: todo_id,
        title: new_todo.title.clone(),
        done: new_todo.done,
    }
}

impl TodoReader for InMemoryTodoStore {
    async fn all_todos(&self, _ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<Todo>, Error> {
        Ok(self.read()?.todos.clone())
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let stored = self.read()?;
        let todo = stored.todos.iter().find(|todo| todo.id == todo_id).cloned();

        Ok(todo)
    }
}

impl TodoWriter for InMemoryTodoStore {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut stored = self.write()?;
        stored.highest_todo_id += 1;
        let created = todo_from_create(stored.highest_todo_id, new_todo);
        stored.todos.push(created.clone());

        Ok(created)
    }

    async fn save_todo(
        &self,
        todo: &Todo,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut stored = self.write()?;
        match stored.todos.iter_mut().find(|existing| existing.id == todo.id) {
            Some(existing) => *existing = todo.clone(),
            None => {
                stored.todos.push(todo.clone());
                stored.todos.sort_by_key(|existing| existing.id);
                stored.highest_todo_id = stored.highest_todo_id.max(todo.id);
            }
        }

        Ok(todo.clone())
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        self.write()?.todos.retain(|todo| todo.id != todo_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external_connections::test_util::FakeExternalConnectivity;
    use speculoos::prelude::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_owned(),
            done: false,
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = InMemoryTodoStore::new_with_todos(&[new_todo("a"), new_todo("b")]);
        let mut ext_cxn = FakeExternalConnectivity::new();

        store
            .delete_todo(2, &mut ext_cxn)
            .await
            .expect("delete should succeed");
        let created = store.create_todo(&new_todo("c"), &mut ext_cxn).await;
        assert_that!(created).is_ok().matches(|todo| todo.id == 3);
    }

    #[tokio::test]
    async fn seeded_ids_continue_after_last_seed() {
        let mut ext_cxn = FakeExternalConnectivity::new();

        let empty = InMemoryTodoStore::new_with_todos(&[]);
        let first = empty.create_todo(&new_todo("a"), &mut ext_cxn).await;
        assert_that!(first).is_ok().matches(|todo| todo.id == 1);

        let seeded = InMemoryTodoStore::new_with_todos(&[new_todo("a"), new_todo("b"), new_todo("c")]);
        let next = seeded.create_todo(&new_todo("d"), &mut ext_cxn).await;
        assert_that!(next).is_ok().matches(|todo| todo.id == 4);
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = InMemoryTodoStore::new();
        let other_handle = store.clone();
        let mut ext_cxn = FakeExternalConnectivity::new();

        store
            .create_todo(&new_todo("shared"), &mut ext_cxn)
            .await
            .expect("create should succeed");
        let seen = other_handle.all_todos(&mut ext_cxn).await;
        assert_that!(seen).is_ok().has_length(1);
    }

    #[tokio::test]
    async fn save_replaces_whole_record() {
        let store = InMemoryTodoStore::new_with_todos(&[new_todo("a")]);
        let mut ext_cxn = FakeExternalConnectivity::new();

        let replacement = Todo {
            id: 1,
            title: "z".to_owned(),
            done: true,
        };
        store
            .save_todo(&replacement, &mut ext_cxn)
            .await
            .expect("save should succeed");
        let fetched = store.todo_by_id(1, &mut ext_cxn).await;
        assert_that!(fetched).is_ok().is_some().is_equal_to(replacement);
    }

    #[tokio::test]
    async fn save_reinserts_a_vanished_record() {
        let store = InMemoryTodoStore::new_with_todos(&[new_todo("a"), new_todo("b")]);
        let mut ext_cxn = FakeExternalConnectivity::new();

        store
            .delete_todo(1, &mut ext_cxn)
            .await
            .expect("delete should succeed");
        let restored = Todo {
            id: 1,
            title: "a again".to_owned(),
            done: false,
        };
        store
            .save_todo(&restored, &mut ext_cxn)
            .await
            .expect("save should succeed");

        let listed = store.all_todos(&mut ext_cxn).await;
        assert_that!(listed)
            .is_ok()
            .matches(|todos| matches!(todos.as_slice(), [Todo { id: 1, .. }, Todo { id: 2, .. }]));
    }
}
