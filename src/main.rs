use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use logvault::{commands, Archive, Classifier, Config, ElasticsearchBackend, History, Intake, SearchGateway};

#[derive(Parser)]
#[command(name = "logvault", about = "Classify, archive and search uploaded log files")]
struct Cli {
    /// Config file (defaults to ~/.config/logvault/config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/logvault-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify and archive log files.
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the detected log type of each file without archiving it.
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List archived files per type, newest first.
    History {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Free-text search in the external index, scoped to one log type.
    Search {
        #[arg(long = "type", short = 't')]
        log_type: String,
        query: String,
    },
    /// List the supported log types.
    Types,
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/logvault-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("logvault debug log started (tail -f /tmp/logvault-debug.log)");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Ingest { files } => {
            let archive = Archive::new(&config.archive);
            archive.ensure_layout()?;
            let intake = Intake::new(&config.intake, Classifier::new(), archive);
            commands::ingest(&intake, &files, &mut out)?;
        }
        Command::Classify { files } => {
            commands::classify(&Classifier::new(), &files, &mut out)?;
        }
        Command::History { json } => {
            commands::history(&History::new(&config.archive), json, &mut out)?;
        }
        Command::Search { log_type, query } => {
            let backend = Arc::new(ElasticsearchBackend::new(&config.search));
            let gateway = SearchGateway::new(backend);
            let mut err = std::io::stderr();
            commands::search(&gateway, &log_type, &query, &mut out, &mut err).await?;
        }
        Command::Types => commands::types(&mut out)?,
    }
    Ok(())
}
