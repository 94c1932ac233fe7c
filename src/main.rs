use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use patched_lsp::exit_codes;
use patched_lsp::locate::{TOOL_NAME, find_patched};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Command to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the language server on stdio
    Server {
        /// Listen on a local TCP port instead of stdio (for debugging)
        #[arg(long)]
        tcp: Option<u16>,
    },
    /// Locate the lint engine executable and print where it was found
    Locate {
        /// Project root to search from (defaults to the current directory)
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Server { tcp } => {
            let result = match tcp {
                Some(port) => patched_lsp::lsp::start_tcp_server(port).await,
                None => patched_lsp::lsp::start_server().await,
            };
            if let Err(e) = result {
                eprintln!("{}: {e}", "error".red().bold());
                process::exit(exit_codes::TOOL_ERROR);
            }
        }
        Commands::Locate { root } => {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            match find_patched(&root).await {
                Some(path) => {
                    println!("{} {}", "✓".green(), path.display());
                    process::exit(exit_codes::SUCCESS);
                }
                None => {
                    eprintln!(
                        "{} no {TOOL_NAME} executable found from {}",
                        "✗".yellow(),
                        root.display()
                    );
                    process::exit(exit_codes::UNAVAILABLE);
                }
            }
        }
    }
}
