use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splaycli::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Search the catalog for tracks
    Search(SearchOptions),

    /// Build a playlist interactively
    Session,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    #[clap(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Number of tracks to show (1-50)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    if let Err(e) = config::validate() {
        error!(
            "Invalid configuration, check {}. Err: {}",
            config::env_path().display(),
            e
        );
    }

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Search(opt) => {
            let limit = opt.limit.unwrap_or_else(config::search_limit);
            cli::search(opt.query.join(" "), limit).await
        }
        Command::Session => cli::session().await,
        Command::Completions(_) => {}
    }
}
