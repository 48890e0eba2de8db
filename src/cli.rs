//! Command-line client for the todo API.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::application::dto::{CreateTodoRequest, UpdateTodoRequest};
use crate::client::TodoClient;
use crate::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::domain::todo::Todo;

/// Manage todos via the todo API
#[derive(Parser, Debug)]
#[command(name = "todo-cli", version, about = "Manage todos via the todo API")]
pub struct Cli {
    /// Base URL of the todo API server
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage todo items
    #[command(subcommand)]
    Todos(TodoCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TodoCommand {
    /// List todos
    List(ListArgs),
    /// Get a specific todo
    Get {
        /// The ID of the todo
        id: String,
    },
    /// Create a new todo
    Create {
        /// The title of the todo
        title: String,
        /// Mark the todo as completed
        #[arg(long)]
        completed: bool,
    },
    /// Update an existing todo
    Update {
        /// The ID of the todo to update
        id: String,
        /// The new title
        title: String,
        /// Set completion status
        #[arg(long)]
        completed: bool,
    },
    /// Delete a todo
    Delete {
        /// The ID of the todo to delete
        id: String,
    },
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct ListArgs {
    /// Number of items to skip
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
    /// Maximum number of items to return
    #[arg(long, default_value_t = 50)]
    pub limit: i64,
}

pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let client = TodoClient::new(cli.base_url);
    let Commands::Todos(command) = cli.command;
    tracing::debug!(base_url = client.base_url(), ?command, "running command");
    execute(&client, command, out).await
}

pub async fn execute(client: &TodoClient, command: TodoCommand, out: &mut impl Write) -> Result<()> {
    match command {
        TodoCommand::List(ListArgs { offset, limit }) => {
            let page = client.list(offset, limit).await?;
            writeln!(out, "Showing {} todo(s) (offset={}, limit={}):", page.items.len(), page.offset, page.limit)?;
            writeln!(out)?;
            for todo in &page.items { write!(out, "{}", render_todo(todo))?; }
        }
        TodoCommand::Get { id } => {
            let todo = client.get(&id).await?;
            write!(out, "{}", render_todo(&todo))?;
        }
        TodoCommand::Create { title, completed } => {
            let todo = client.create(&CreateTodoRequest { title, completed: Some(completed) }).await?;
            writeln!(out, "Created:")?;
            write!(out, "{}", render_todo(&todo))?;
        }
        TodoCommand::Update { id, title, completed } => {
            let todo = client.update(&id, &UpdateTodoRequest { title, completed }).await?;
            writeln!(out, "Updated:")?;
            write!(out, "{}", render_todo(&todo))?;
        }
        TodoCommand::Delete { id } => {
            client.delete(&id).await?;
            writeln!(out, "Deleted todo {id}.")?;
        }
    }
    Ok(())
}

/// Two lines per todo: status, id and title, then both timestamps.
pub fn render_todo(todo: &Todo) -> String {
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    let fmt = "%Y-%m-%d %H:%M:%SZ";
    format!(
        "  {} {}  {}\n      Created: {}  Updated: {}\n",
        mark,
        todo.id,
        todo.title,
        todo.created_at.format(fmt),
        todo.updated_at.format(fmt),
    )
}
