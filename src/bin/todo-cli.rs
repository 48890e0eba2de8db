use clap::Parser;

use todo_api::cli::{self, Cli};
use todo_api::config::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    cli::run(cli, &mut stdout).await
}
