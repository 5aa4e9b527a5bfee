//! In-memory todo store.
//!
//! # Design
//! `TodoStore` owns the ordered collection and the id counter. The server
//! wraps it in a `SharedStore` and hands it to every handler through axum
//! state, so its lifetime is exactly the lifetime of the process. Each
//! handler takes the lock once for the whole operation, which makes every
//! operation atomic with respect to the others.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// A single todo record as stored and returned on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Input for `TodoStore::create`. Both fields are optional at the type level
/// so that a missing title is reported as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update. Only the fields that are `Some` are applied.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

pub type SharedStore = Arc<RwLock<TodoStore>>;

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn list(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: u64) -> Result<Todo, StoreError> {
        self.todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn create(&mut self, input: NewTodo) -> Result<Todo, StoreError> {
        let title = input
            .title
            .filter(|t| !is_blank(t))
            .ok_or(StoreError::Validation)?;

        let todo = Todo {
            id: self.next_id,
            title,
            description: input.description.unwrap_or_default(),
            completed: false,
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Result<Todo, StoreError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        // Validate before touching anything so a rejected patch is a no-op.
        if patch.title.as_deref().is_some_and(is_blank) {
            return Err(StoreError::Validation);
        }

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Todo, StoreError> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        // `remove` shifts the tail down, keeping insertion order intact.
        Ok(self.todos.remove(index))
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: Some(title.to_string()),
            description: None,
        }
    }

    #[test]
    fn create_assigns_increasing_ids_and_defaults() {
        let mut store = TodoStore::new();
        let a = store.create(new_todo("Buy milk")).unwrap();
        let b = store.create(new_todo("Walk dog")).unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.description, "");
        assert!(!a.completed);
        assert_eq!(store.list(), vec![a, b]);
    }

    #[test]
    fn create_keeps_description() {
        let mut store = TodoStore::new();
        let todo = store
            .create(NewTodo {
                title: Some("Read".to_string()),
                description: Some("chapter 3".to_string()),
            })
            .unwrap();
        assert_eq!(todo.description, "chapter 3");
    }

    #[test]
    fn create_rejects_missing_empty_and_blank_titles() {
        let mut store = TodoStore::new();
        for input in [NewTodo::default(), new_todo(""), new_todo("   \t")] {
            assert!(matches!(store.create(input), Err(StoreError::Validation)));
        }
        assert!(store.is_empty());

        // A failed create must not burn an id.
        let todo = store.create(new_todo("First")).unwrap();
        assert_eq!(todo.id, 1);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = TodoStore::new();
        let first = store.create(new_todo("a")).unwrap();
        store.delete(first.id).unwrap();
        let second = store.create(new_todo("b")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn update_completed_only_leaves_other_fields() {
        let mut store = TodoStore::new();
        let before = store
            .create(NewTodo {
                title: Some("Buy milk".to_string()),
                description: Some("2 litres".to_string()),
            })
            .unwrap();

        let after = store
            .update(
                before.id,
                TodoPatch {
                    completed: Some(true),
                    ..TodoPatch::default()
                },
            )
            .unwrap();

        assert!(after.completed);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(store.get(before.id).unwrap(), after);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = TodoStore::new();
        store.create(new_todo("a")).unwrap();
        let err = store.update(42, TodoPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_with_blank_title_changes_nothing() {
        let mut store = TodoStore::new();
        let before = store.create(new_todo("keep")).unwrap();
        let err = store
            .update(
                before.id,
                TodoPatch {
                    title: Some(" ".to_string()),
                    completed: Some(true),
                    ..TodoPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation));
        assert_eq!(store.get(before.id).unwrap(), before);
    }

    #[test]
    fn delete_removes_exactly_one_and_preserves_order() {
        let mut store = TodoStore::new();
        let a = store.create(new_todo("a")).unwrap();
        let b = store.create(new_todo("b")).unwrap();
        let c = store.create(new_todo("c")).unwrap();

        let removed = store.delete(b.id).unwrap();
        assert_eq!(removed, b);
        assert_eq!(store.list(), vec![a, c]);
    }

    #[test]
    fn second_delete_is_not_found() {
        let mut store = TodoStore::new();
        let a = store.create(new_todo("a")).unwrap();
        store.delete(a.id).unwrap();
        assert!(matches!(store.delete(a.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn new_todo_deserializes_without_fields() {
        let input: NewTodo = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn patch_partial_fields() {
        let patch: TodoPatch = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: 1,
            title: "Test".to_string(),
            description: String::new(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Test", "description": "", "completed": false})
        );
    }
}
