use clap::Parser;
use keyed_filter::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => cli::inspect::run(args).await,
    }
}
