//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by splaycli:
//! authentication, catalog search and playlist creation. It handles all HTTP
//! communication, response normalization and rate limiting, and knows nothing
//! about playback.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, interactive session)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Search (tracks → TrackRecord)
//!     ├── User (current user id)
//!     └── Playlist Operations (Create, Add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh
//! - [`search`] - Track search, normalized into flat track records
//! - [`user`] - Resolves the user id playlists are created under
//! - [`playlist`] - Creates private playlists and adds tracks in batches
//!
//! ## API Coverage
//!
//! - `GET /search` - Track search
//! - `GET /me` - Current user profile
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Error Handling
//!
//! All requests go through [`send`], which applies the same policy everywhere:
//!
//! - **429 Too Many Requests**: waits for `Retry-After` (up to 120 seconds)
//!   and retries once; longer delays are reported as a warning and the error
//!   is returned
//! - **502 Bad Gateway**: retried once after a short pause
//! - Everything else is returned to the caller as a `reqwest::Error`
//!
//! ## Usage Patterns
//!
//! ```rust
//! let tracks = spotify::search::search_tracks(&token, "boards of canada", 20).await?;
//!
//! let user_id = spotify::user::current_user_id(&token).await?;
//! let playlist = spotify::playlist::create(&token, &user_id, "Road trip").await?;
//! spotify::playlist::add_tracks(&token, &playlist.id, &uris).await?;
//! ```

pub mod auth;
pub mod playlist;
pub mod search;
pub mod user;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::warning;

const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_PAUSE: Duration = Duration::from_secs(5);

/// Sends `request`, retrying once on rate limiting or a bad gateway.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, reqwest::Error> {
    let retry = request.try_clone();
    let response = request.send().await?;

    let pause = match response.status() {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after > MAX_RETRY_AFTER_SECS {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
                None
            } else {
                Some(Duration::from_secs(retry_after))
            }
        }
        StatusCode::BAD_GATEWAY => Some(BAD_GATEWAY_PAUSE),
        _ => None,
    };

    match (pause, retry) {
        (Some(pause), Some(retry)) => {
            sleep(pause).await;
            retry.send().await?.error_for_status()
        }
        _ => response.error_for_status(),
    }
}
