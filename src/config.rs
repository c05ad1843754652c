//! Configuration management for splaycli.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, the OAuth callback listener
//! and search settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (public Spotify endpoints, search limit)

use std::{env, path::PathBuf};

use thiserror::Error;

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";
const DEFAULT_SEARCH_LIMIT: u32 = 20;

const REQUIRED: [&str; 3] = [
    "SERVER_ADDRESS",
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_REDIRECT_URI",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(String),

    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<String>),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `splaycli/.env` in the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/splaycli/.env`
/// - macOS: `~/Library/Application Support/splaycli/.env`
/// - Windows: `%LOCALAPPDATA%/splaycli/.env`
///
/// A missing file is not an error; the process environment is used as is.
/// Values already present in the environment win over the file.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::Dotenv(e.to_string()))
}

/// Checks that every setting without a default is present.
///
/// Called once at startup so the accessors below never have to fail.
pub fn validate() -> Result<(), ConfigError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|key| env::var(key).map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Missing(missing))
    }
}

/// Path of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = data_dir();
    path.push(".env");
    path
}

/// Root of everything splaycli stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("splaycli");
    path
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_default()
}

/// Returns the Spotify API client ID used for the PKCE flow.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_ID`, obtained when registering the
/// application on Spotify's developer dashboard. PKCE needs no client secret.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify OAuth redirect URI.
///
/// Reads `SPOTIFY_API_REDIRECT_URI`. It must match the redirect URI registered
/// for the application and point at [`server_addr`]'s `/callback` route.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").unwrap_or_default()
}

/// Returns the scope requested during authorization.
///
/// Defaults to the two playlist-modify scopes needed to save a playlist.
pub fn spotify_scope() -> String {
    env_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the number of tracks requested per search.
///
/// Reads `SEARCH_LIMIT`; unparsable values fall back to the default and the
/// result is clamped to the 1..=50 range the search endpoint accepts.
pub fn search_limit() -> u32 {
    env::var("SEARCH_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, 50)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
