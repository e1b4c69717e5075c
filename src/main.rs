use clap::Parser;
use respondo_console::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Migrate(args) => cli::migrate::run(args).await,
        Command::Keys(args) => cli::keys::run(args).await,
        Command::Openai(args) => cli::openai::run(args).await,
    }
}
