use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Normalized description of one catalog entry.
///
/// `preview_url` is the only field the playback subsystem looks at: a record
/// without one never gets a play control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
    pub duration: String,
    pub preview_url: Option<String>,
}

impl TrackRecord {
    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Results,
    Playlist,
}

impl Collection {
    pub fn prefix(&self) -> &'static str {
        match self {
            Collection::Results => "r",
            Collection::Playlist => "p",
        }
    }

    pub fn action(&self) -> RowAction {
        match self {
            Collection::Results => RowAction::Add,
            Collection::Playlist => RowAction::Remove,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Results => write!(f, "results"),
            Collection::Playlist => write!(f, "playlist"),
        }
    }
}

/// Collection intent a row offers; passed through untouched by playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Add,
    Remove,
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Add => write!(f, "+"),
            RowAction::Remove => write!(f, "-"),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: String,
    #[tabled(rename = "")]
    pub toggle: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    #[tabled(rename = "")]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<ApiTrack>,
    pub total: Option<u64>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub preview_url: Option<String>,
    pub artists: Vec<ApiArtist>,
    pub album: ApiAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAlbum {
    pub id: Option<String>,
    pub name: String,
}

impl From<ApiTrack> for TrackRecord {
    fn from(track: ApiTrack) -> Self {
        TrackRecord {
            id: track.id,
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            album: track.album.name,
            uri: track.uri,
            duration: utils::format_duration(track.duration_ms),
            preview_url: track.preview_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}
