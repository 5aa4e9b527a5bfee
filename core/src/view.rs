//! Client-side view state for a fetched todo list.
//!
//! # Design
//! `TodoList` holds the collection exactly as the server last reported it
//! and reconciles it with each authoritative response: append on create,
//! replace-by-id on update, remove-by-id on delete. Filtering, pagination
//! and edit mode are presentation state only; they never produce requests
//! other than the `CreateTodo`/`UpdateTodo` values handed back to the caller.

use std::str::FromStr;

use crate::types::{CreateTodo, Todo, UpdateTodo};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("no todo with id {0}")]
    UnknownTodo(u64),

    #[error("no edit in progress")]
    NotEditing,

    #[error("unknown filter `{0}` (expected all, active or done)")]
    UnknownFilter(String),
}

/// Which todos are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "done",
        }
    }
}

impl FromStr for Filter {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" | "open" => Ok(Filter::Active),
            "done" | "completed" => Ok(Filter::Completed),
            other => Err(ViewError::UnknownFilter(other.to_string())),
        }
    }
}

/// In-progress inline edit of one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Build a create request from user input, or `None` if the title is blank.
pub fn new_todo(title: &str, description: &str) -> Option<CreateTodo> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(CreateTodo {
        title: title.to_string(),
        description: description.trim().to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct TodoList {
    todos: Vec<Todo>,
    filter: Filter,
    page: usize,
    page_size: usize,
    editing: Option<EditDraft>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TodoList {
    pub fn new(page_size: usize) -> Self {
        Self {
            todos: Vec::new(),
            filter: Filter::All,
            page: 1,
            page_size: page_size.max(1),
            editing: None,
        }
    }

    /// Replace the whole collection, e.g. after the initial fetch.
    pub fn load(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        if let Some(draft) = &self.editing {
            if self.get(draft.id).is_none() {
                self.editing = None;
            }
        }
        self.clamp_page();
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn apply_created(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Replace the local copy with the server's. Returns false if the id is
    /// not held locally. Closes the edit draft for that todo, if any.
    pub fn apply_updated(&mut self, todo: Todo) -> bool {
        if self.editing.as_ref().is_some_and(|d| d.id == todo.id) {
            self.editing = None;
        }
        let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) else {
            return false;
        };
        *slot = todo;
        self.clamp_page();
        true
    }

    pub fn apply_deleted(&mut self, id: u64) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        let removed = self.todos.remove(index);
        if self.editing.as_ref().is_some_and(|d| d.id == id) {
            self.editing = None;
        }
        self.clamp_page();
        Some(removed)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Todos matching the current filter, in server order.
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero when nothing is visible.
    pub fn total_pages(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> Vec<&Todo> {
        self.visible()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Pages are 1-based; out-of-range requests are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    fn clamp_page(&mut self) {
        let last = self.total_pages().max(1);
        if self.page > last {
            self.page = last;
        }
    }

    /// The update that flips `completed` for `id`.
    pub fn toggle_request(&self, id: u64) -> Result<UpdateTodo, ViewError> {
        let todo = self.get(id).ok_or(ViewError::UnknownTodo(id))?;
        Ok(UpdateTodo::completed(!todo.completed))
    }

    pub fn begin_edit(&mut self, id: u64) -> Result<&EditDraft, ViewError> {
        let todo = self.get(id).ok_or(ViewError::UnknownTodo(id))?;
        let draft = EditDraft {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
        };
        Ok(self.editing.insert(draft))
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) -> Option<EditDraft> {
        self.editing.take()
    }

    /// The update carrying only the fields the draft changed. The draft
    /// stays open until the server's answer arrives via `apply_updated`.
    pub fn commit_edit(&self) -> Result<(u64, UpdateTodo), ViewError> {
        let draft = self.editing.as_ref().ok_or(ViewError::NotEditing)?;
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ViewError::EmptyTitle);
        }
        let current = self.get(draft.id).ok_or(ViewError::UnknownTodo(draft.id))?;

        let description = draft.description.trim();
        let update = UpdateTodo {
            title: (title != current.title).then(|| title.to_string()),
            description: (description != current.description).then(|| description.to_string()),
            completed: None,
        };
        Ok((draft.id, update))
    }
}
