//! # postchat CLI
//!
//! ```bash
//! postchat --config ./config/postchat.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `postchat init` | Create the SQLite posts schema |
//! | `postchat posts` | List the most recent posts |
//! | `postchat context` | Print the composed system prompt for a mode |
//! | `postchat chat "<message>"` | One-shot grounded completion |
//! | `postchat serve` | Start the HTTP API |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use postchat_core::Mode;
use postchat::{chat, config, logging, migrate, posts, server};

/// postchat: chat completions grounded in your blog posts.
#[derive(Parser)]
#[command(
    name = "postchat",
    about = "postchat: chat completions grounded in your blog posts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Provider credentials may be omitted from the file and supplied via
    /// AZURE_OPENAI_API_KEY, AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_DEPLOYMENT
    /// and AZURE_OPENAI_API_VERSION.
    #[arg(long, global = true, default_value = "./config/postchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the posts schema. Idempotent.
    Init,

    /// List the most recent posts, newest first.
    Posts {
        /// Maximum number of posts to list.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Print the system prompt that would be sent, without calling the provider.
    Context {
        /// Grounding mode: `strict` or `dynamic`.
        #[arg(long, default_value = "strict")]
        mode: Mode,
    },

    /// Ask a single question through the full completion pipeline.
    Chat {
        /// The user message.
        message: String,

        /// Grounding mode: `strict` (posts only) or `dynamic` (posts + general knowledge).
        #[arg(long)]
        mode: Option<Mode>,

        /// Legacy switch: do not restrict answers to the posts.
        /// Ignored when `--mode` is given.
        #[arg(long)]
        no_ground: bool,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Posts { limit } => {
            posts::run_posts(&cfg, limit).await?;
        }
        Commands::Context { mode } => {
            chat::run_context(&cfg, mode).await?;
        }
        Commands::Chat {
            message,
            mode,
            no_ground,
        } => {
            chat::run_chat(&cfg, &message, mode, no_ground).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
