use clap::Parser;
use rag_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Ingest(args) => cli::ingest::run(args).await,
        Command::Query(args) => cli::query::run(args).await,
    }
}
