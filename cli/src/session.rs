//! One interactive client session: the local view plus the means to talk to
//! the server.
//!
//! Every user action issues at most one request and waits for it. The local
//! list is only changed from the server's answer, so a failed request leaves
//! the view exactly as it was. Failures are reported, never retried.

use todo_core::{new_todo, ApiError, Todo, TodoClient, TodoList, ViewError};
use tracing::info;

use crate::command::Command;
use crate::transport::{Transport, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Message(String),
    Help,
    Quit,
}

pub struct Session<T> {
    client: TodoClient,
    transport: T,
    view: TodoList,
}

impl<T: Transport> Session<T> {
    pub fn new(client: TodoClient, transport: T, page_size: usize) -> Self {
        Self {
            client,
            transport,
            view: TodoList::new(page_size),
        }
    }

    pub fn view(&self) -> &TodoList {
        &self.view
    }

    pub fn refresh(&mut self) -> Result<(), SessionError> {
        let response = self.transport.execute(self.client.build_list_todos())?;
        let todos = self.client.parse_list_todos(response)?;
        info!(count = todos.len(), "todos loaded");
        self.view.load(todos);
        Ok(())
    }

    pub fn add(&mut self, title: &str, description: &str) -> Result<Todo, SessionError> {
        let input = new_todo(title, description).ok_or(ViewError::EmptyTitle)?;
        let response = self.transport.execute(self.client.build_create_todo(&input)?)?;
        let todo = self.client.parse_create_todo(response)?;
        self.view.apply_created(todo.clone());
        Ok(todo)
    }

    pub fn toggle(&mut self, id: u64) -> Result<Todo, SessionError> {
        let update = self.view.toggle_request(id)?;
        let response = self.transport.execute(self.client.build_update_todo(id, &update)?)?;
        let todo = self.client.parse_update_todo(response)?;
        self.view.apply_updated(todo.clone());
        Ok(todo)
    }

    pub fn delete(&mut self, id: u64) -> Result<Todo, SessionError> {
        let response = self.transport.execute(self.client.build_delete_todo(id))?;
        let todo = self.client.parse_delete_todo(response)?;
        self.view.apply_deleted(todo.id);
        Ok(todo)
    }

    /// Send the edit draft. `None` when nothing changed, in which case the
    /// draft is simply closed without a request.
    pub fn save_edit(&mut self) -> Result<Option<Todo>, SessionError> {
        let (id, update) = self.view.commit_edit()?;
        if update.is_empty() {
            self.view.cancel_edit();
            return Ok(None);
        }
        let response = self.transport.execute(self.client.build_update_todo(id, &update)?)?;
        let todo = self.client.parse_update_todo(response)?;
        self.view.apply_updated(todo.clone());
        Ok(Some(todo))
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let outcome = match command {
            Command::List => Outcome::Render,
            Command::Add { title, description } => {
                let todo = self.add(&title, &description)?;
                Outcome::Message(format!("added #{}", todo.id))
            }
            Command::Toggle(id) => {
                let todo = self.toggle(id)?;
                let state = if todo.completed { "done" } else { "not done" };
                Outcome::Message(format!("#{id} marked {state}"))
            }
            Command::Edit(id) => {
                self.view.begin_edit(id)?;
                Outcome::Render
            }
            Command::Title(title) => {
                self.view.draft_mut().ok_or(ViewError::NotEditing)?.title = title;
                Outcome::Render
            }
            Command::Desc(description) => {
                self.view.draft_mut().ok_or(ViewError::NotEditing)?.description = description;
                Outcome::Render
            }
            Command::Save => match self.save_edit()? {
                Some(todo) => Outcome::Message(format!("saved #{}", todo.id)),
                None => Outcome::Message("nothing to save".to_string()),
            },
            Command::Cancel => match self.view.cancel_edit() {
                Some(_) => Outcome::Render,
                None => return Err(ViewError::NotEditing.into()),
            },
            Command::Delete(id) => {
                let todo = self.delete(id)?;
                Outcome::Message(format!("deleted #{} {}", todo.id, todo.title))
            }
            Command::Filter(filter) => {
                self.view.set_filter(filter);
                Outcome::Render
            }
            Command::Page(page) => {
                if self.view.go_to_page(page) {
                    Outcome::Render
                } else {
                    Outcome::Message(format!("no page {page}"))
                }
            }
            Command::Next => {
                self.view.next_page();
                Outcome::Render
            }
            Command::Prev => {
                self.view.prev_page();
                Outcome::Render
            }
            Command::Refresh => {
                self.refresh()?;
                Outcome::Render
            }
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }
}
