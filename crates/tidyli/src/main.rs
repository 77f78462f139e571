mod cli;
mod commands;
mod remote;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the review card on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = || commands::Context::resolve(cli.state_dir.as_deref(), cli.data_dir.as_deref());

    match cli.command {
        Commands::Review { category } => commands::review::run(&ctx()?, category),
        Commands::List { category } => commands::list::run(&ctx()?, category),
        Commands::Decide { url, decision } => commands::decide::run(&ctx()?, &url, decision),
        Commands::Stats => commands::stats::run(&ctx()?),
        Commands::Export { category, out } => {
            commands::export::run(&ctx()?, category, out.as_deref())
        }
        Commands::Serve { port, bind } => commands::serve::run(&ctx()?, port, bind.as_deref()),
        Commands::Version => commands::version::run(),
    }
}
