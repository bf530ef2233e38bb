//! # Search Console CLI (`scon`)
//!
//! The `scon` binary resolves the session's search source, drives the
//! debug panel from a terminal, and starts the HTTP host.
//!
//! ## Usage
//!
//! ```bash
//! scon --config ./config/scon.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scon resolve [VALUE]` | Resolve a source name (default: `SCON_SEARCH_SOURCE`) |
//! | `scon filenames` | Fetch and print the simulated dataset's filenames |
//! | `scon panel` | Render the debug panel, optionally selecting a source or filename |
//! | `scon serve` | Start the HTTP host |
//! | `scon completions <SHELL>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Fails with a non-zero exit: unknown source
//! SCON_SEARCH_SOURCE=bing scon resolve
//!
//! # Switch to simulated data and use one of its files as the query
//! scon panel --select static --use report.pdf
//!
//! # Serve the state and panel over HTTP
//! scon serve --config ./config/scon.toml
//! ```

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::sync::Arc;

use search_console::api::HttpFilenameLister;
use search_console::config;
use search_console::logging;
use search_console::server;
use search_console::session::Session;
use search_console::traits::FilenameLister;
use search_console_core::{resolve_search_source, SearchSource, SEARCH_SOURCE_ENV};

/// Search Console CLI: shared search state and a developer debug panel.
///
/// Commands that talk to the filename API or serve HTTP read a TOML
/// configuration file. When the file does not exist, built-in defaults are
/// used.
#[derive(Parser)]
#[command(
    name = "scon",
    about = "Search Console: shared search state and a debug panel for switching search sources",
    version,
    long_about = "Search Console holds the search front-end's shared state (search term, \
    search source, query results) and provides a developer debug panel for switching between \
    the AI Lab backend, the Azure backend, and a simulated dataset. The default source is read \
    from the SCON_SEARCH_SOURCE environment variable."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/scon.toml`.
    #[arg(long, global = true, default_value = "./config/scon.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a search source name.
    ///
    /// Without VALUE, resolves `SCON_SEARCH_SOURCE` the way session startup
    /// does: unset means `azure`, an unknown name is an error.
    Resolve {
        /// Source name to resolve (`ailab`, `azure`, `static`, `simulated`; any case).
        value: Option<String>,
    },

    /// Fetch the simulated dataset's filenames once and print them.
    Filenames,

    /// Render the debug panel.
    ///
    /// Starts a session from `SCON_SEARCH_SOURCE`, applies the optional
    /// actions in order, waits for any filename fetch, and prints the panel
    /// and the resulting search state.
    Panel {
        /// Select this search source first.
        #[arg(long)]
        select: Option<String>,

        /// Then use this filename as the search term (requires the static source).
        #[arg(long = "use")]
        use_filename: Option<String>,
    },

    /// Start the HTTP host.
    ///
    /// Binds to `[server].bind` and serves the state and debug panel API.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "scon", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Resolve { value } => {
            let source = match value {
                Some(v) => resolve_search_source(Some(v.as_str()))?,
                None => SearchSource::from_env()
                    .with_context(|| format!("{} is not a valid search source", SEARCH_SOURCE_ENV))?,
            };
            println!("{}", source);
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config_or_default(&cli.config)?;
    logging::init_logging(&cfg.logging)?;

    match cli.command {
        Commands::Filenames => {
            let lister = HttpFilenameLister::new(&cfg.api)?;
            let names = lister.fetch_filenames().await?;
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Panel {
            select,
            use_filename,
        } => {
            let lister = Arc::new(HttpFilenameLister::new(&cfg.api)?);
            let session = Session::from_env(&cfg, lister)?;
            session.panel.settle().await;

            if let Some(name) = select {
                let source: SearchSource = name.parse()?;
                session.panel.select_source(source)?;
                session.panel.settle().await;
            }
            if let Some(filename) = use_filename {
                session.panel.click_filename(&filename)?;
            }

            match session.panel.render_text()? {
                Some(text) => print!("{}", text),
                None => println!("(debug panel hidden)"),
            }
            let state = session.data()?.snapshot();
            println!("{}", serde_json::to_string_pretty(&state)?);
            println!("route: {}", session.routes.current_route());
            for toast in session.toasts.drain() {
                println!("{}", toast.message);
            }
            session.shutdown();
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Resolve { .. } | Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
