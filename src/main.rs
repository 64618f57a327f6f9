use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(
    name = "wordstart",
    version,
    about = "Keyword suggestion service with mock traffic and competition metrics",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listening port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// TOML config file; environment variables are used when omitted
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Expand seed keywords and print the result
    Expand {
        /// Seed keywords
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Language code
        #[arg(short, long, default_value = "ru")]
        language: String,

        /// Geo-target codes (repeatable)
        #[arg(long)]
        location: Vec<String>,

        /// Output format (json, csv, txt)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Seed for reproducible metrics
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, config } => {
            let config = commands::serve::load_config(config.as_deref(), host.as_deref(), port)?;
            let format = cli.log_format.as_deref().unwrap_or(&config.log_format);
            setup_tracing(format, cli.verbose || config.debug)?;

            tracing::info!(
                host = %config.host,
                port = config.port,
                "Starting serve command"
            );
            commands::serve::serve(config).await?;
        }

        Commands::Expand {
            seeds,
            language,
            location,
            format,
            seed,
        } => {
            setup_tracing(cli.log_format.as_deref().unwrap_or("text"), cli.verbose)?;

            tracing::debug!(
                seeds = ?seeds,
                language = %language,
                location = ?location,
                format = %format,
                "Starting expand command"
            );
            let output = commands::expand::expand(commands::expand::ExpandParams {
                seeds,
                language,
                locations: location,
                format,
                seed,
            })?;
            println!("{output}");
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("wordstart=debug,tower_http=debug,info")
        } else {
            tracing_subscriber::EnvFilter::new("wordstart=info,warn")
        }
    });

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
        }
    }

    Ok(())
}
