use clap::Parser;
use feed_image::{
    cli::{
        commands::{self, ProcessOptions},
        Cli, Commands,
    },
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feed_image=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Commands::Process {
            feed,
            config,
            ignore,
            override_image,
            pretty,
        } => {
            commands::process(
                &settings,
                &feed,
                ProcessOptions {
                    config,
                    ignore,
                    override_image,
                    pretty,
                },
            )?;
        }
        Commands::Extract { html } => {
            commands::extract(&html)?;
        }
        Commands::Validate { config } => {
            commands::validate(&config)?;
        }
    }

    Ok(())
}
