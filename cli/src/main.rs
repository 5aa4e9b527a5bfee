use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use todo_cli::{parse, render, Outcome, Session, UreqTransport, HELP};
use todo_core::{TodoClient, DEFAULT_PAGE_SIZE};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Terminal client for the todo API")]
struct Args {
    /// Base URL of the todo server.
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:5000")]
    url: String,

    /// Todos shown per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the rendered list.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let client = TodoClient::new(&args.url);
    let mut session = Session::new(client, UreqTransport::new(), args.page_size);
    if let Err(e) = session.refresh() {
        warn!(error = %e, url = %args.url, "initial load failed");
        println!("could not load todos: {e}");
    }
    print!("{}", render(session.view()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush().context("writing prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("reading stdin")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.handle(command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Help) => println!("{HELP}"),
            Ok(Outcome::Render) => print!("{}", render(session.view())),
            Ok(Outcome::Message(message)) => {
                println!("{message}");
                print!("{}", render(session.view()));
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                println!("error: {e}");
            }
        }
    }
    Ok(())
}
