//! # CLI Module
//!
//! This module provides the command-line interface layer for splaycli, a
//! playlist builder for the Spotify API. It implements the user-facing
//! commands and coordinates between the Spotify client, the local token cache
//! and the interactive session.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth flow with PKCE and caches the token
//! - [`search`] - One-shot catalog search, printed as a table; tracks with a
//!   preview clip are marked
//! - [`session`] - Interactive playlist builder: search, add and remove
//!   tracks, play previews, save the playlist to Spotify
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (commands, interactive session)
//!     ↓
//! App / Playback (draft, rows, coordinator)      Management (token cache)
//!     ↓
//! Spotify Layer (search, user, playlist)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Playback never talks to the Spotify layer and the other way round; the
//! session is the only place where both meet.
//!
//! ## Usage Patterns
//!
//! ```bash
//! splaycli auth                      # Authenticate with Spotify
//! splaycli search "nils frahm"       # Quick look at the catalog
//! splaycli session                   # Build a playlist interactively
//! ```
//!
//! Inside a session:
//!
//! ```text
//! search nils frahm
//! play r1          # preview the first result
//! add 1            # put it on the playlist
//! name Late Night
//! save
//! ```
//!
//! ## Error Handling
//!
//! - Missing or unusable tokens end the command with a hint to run `auth`
//! - Failed searches and saves are reported as warnings; the session goes on
//! - A failed preview only marks its row and never interrupts the session

mod auth;
mod playlist;
mod search;
mod session;

pub use auth::auth;
pub use playlist::{SaveError, save_playlist};
pub use search::search;
pub use session::session;
