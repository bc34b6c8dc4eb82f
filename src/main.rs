use clap::Parser;
use fightcard::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fightcard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, backend }) => {
            fightcard::cli::init::run(path, backend).await?;
        }
        Some(Commands::Serve { host, port }) => {
            fightcard::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Check) => {
            fightcard::cli::check::run(&cli.config).await?;
        }
        Some(Commands::Slug { names }) => {
            fightcard::cli::slug::run(&names)?;
        }
        Some(Commands::Resolve { kind, slug }) => {
            fightcard::cli::resolve::run(&cli.config, kind, &slug).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
