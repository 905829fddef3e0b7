use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use udc_core::UdcConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "udc", version, about = "Universal Data Connector CLI")]
struct Cli {
    /// Configuration file. A missing file means defaults.
    #[arg(long, global = true, env = "UDC_CONFIG", default_value = "udc.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API.
    Serve {
        /// Bind host, overrides server.host
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one query and print the response envelope as JSON.
    Query {
        /// Data source: crm, support or analytics
        source: String,

        /// Filter as field=value; comparisons use field__gt, field__lt, field__gte, field__lte
        #[arg(short = 'f', long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,

        #[arg(long, default_value_t = udc_core::DEFAULT_LIMIT as i64)]
        limit: i64,

        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Truncate, project and summarize for voice
        #[arg(long, default_value_t = false)]
        voice: bool,
    },

    /// Send one chat message to the configured model.
    Chat {
        message: String,
    },

    /// Print the tool definitions declared to the model.
    Tools,

    /// Validate configuration and report record counts per source.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = UdcConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Serve { host, port } => commands::serve::run(config, host, port).await,
        Command::Query {
            source,
            filters,
            limit,
            offset,
            voice,
        } => commands::query::run(&config, source, &filters, limit, offset, voice).await,
        Command::Chat { message } => commands::chat::run(&config, &message).await,
        Command::Tools => commands::tools::run(),
        Command::Check => commands::check::run(&config, &cli.config).await,
    }
}
