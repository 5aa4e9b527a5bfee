//! Terminal client for the todo API.
//!
//! Reads commands from a line-oriented prompt, turns each into at most one
//! request built by `todo_core::TodoClient`, executes it with ureq, and
//! redraws the locally held list from the server's answer.

pub mod command;
pub mod render;
pub mod session;
pub mod transport;

pub use command::{parse, Command, CommandError, HELP};
pub use render::render;
pub use session::{Outcome, Session, SessionError};
pub use transport::{Transport, TransportError, UreqTransport};
