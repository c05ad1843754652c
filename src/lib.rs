//! splaycli library
//!
//! This library provides the building blocks of the splaycli playlist builder:
//! a Spotify Web API client, the interactive session state and the preview
//! playback subsystem that keeps at most one preview clip audible at a time.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback listener
//! - `app` - Session state: search results, playlist draft and their rows
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token cache and the playlist draft
//! - `playback` - Preview playback coordinator, track rows and audio backends
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers, formatting and session command parsing
//!
//! # Example
//!
//! ```
//! use splaycli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     cli::search("aphex twin".to_string(), 10).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod management;
pub mod playback;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints `[o] message` with a blue marker.
///
/// ```ignore
/// info!("Found {} tracks", tracks.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints `[✓] message` with a green marker.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints `[!] message` in red and exits with status 1.
///
/// Only for failures the command cannot continue from, such as a missing
/// token cache or an invalid `.env`. Inside the interactive session use
/// [`warning!`] so the session keeps running.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints `[!] message` with a yellow marker. Recoverable problems.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
