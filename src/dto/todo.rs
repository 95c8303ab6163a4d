use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned after a successful delete
pub const DELETED_MESSAGE: &str = "Todo deletado com sucesso";

/// DTO for a to-do item returned on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct Todo {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "buy milk")]
    pub title: String,
    #[schema(example = false)]
    pub done: bool,
}

impl From<domain::todo::Todo> for Todo {
    fn from(value: domain::todo::Todo) -> Self {
        Todo {
            id: value.id,
            title: value.title,
            done: value.done,
        }
    }
}

/// DTO for creating a to-do item. Missing or null fields start out empty/false, and any `id` is
/// ignored.
#[derive(Deserialize, ToSchema, Debug, Default)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[schema(example = "buy milk")]
    pub title: Option<String>,
    #[schema(example = false)]
    pub done: Option<bool>,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            title: value.title.unwrap_or_default(),
            done: value.done.unwrap_or_default(),
        }
    }
}

/// DTO confirming a to-do item was removed
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct DeletedTodo {
    #[schema(example = "Todo deletado com sucesso")]
    pub message: String,
}

impl DeletedTodo {
    pub fn confirmation() -> Self {
        DeletedTodo {
            message: DELETED_MESSAGE.to_owned(),
        }
    }
}
