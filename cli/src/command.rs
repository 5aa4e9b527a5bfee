use todo_core::{Filter, ViewError};

pub const HELP: &str = "\
commands:
  list                          show the current page
  add <title> [| <description>] create a todo
  toggle <id>                   flip completed
  edit <id>                     start editing a todo
  title <text>                  set the draft title
  desc <text>                   set the draft description
  save | cancel                 finish or abandon the edit
  delete <id>                   delete a todo
  filter all|active|done        filter the list
  page <n> | next | prev        change page
  refresh                       reload from the server
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add { title: String, description: String },
    Toggle(u64),
    Edit(u64),
    Title(String),
    Desc(String),
    Save,
    Cancel,
    Delete(u64),
    Filter(Filter),
    Page(usize),
    Next,
    Prev,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error(transparent)]
    Filter(#[from] ViewError),
}

fn number<T: std::str::FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

fn required(name: &'static str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(arg.to_string())
    }
}

/// Parse one input line. The caller skips blank lines.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "add" => {
            let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
            Command::Add {
                title: required("add", title.trim())?,
                description: description.trim().to_string(),
            }
        }
        "toggle" | "done" => Command::Toggle(number(&required("toggle", rest)?)?),
        "edit" => Command::Edit(number(&required("edit", rest)?)?),
        "title" => Command::Title(required("title", rest)?),
        "desc" | "description" => Command::Desc(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete(number(&required("delete", rest)?)?),
        "filter" => Command::Filter(required("filter", rest)?.parse()?),
        "page" => Command::Page(number(&required("page", rest)?)?),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "refresh" | "reload" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}
