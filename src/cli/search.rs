use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    spotify,
    types::{TrackRecord, TrackTableRow},
    warning,
};

pub async fn search(query: String, limit: u32) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splaycli auth\n Error: {}",
                e
            );
        }
    };

    let token = token_mgr.get_valid_token().await;
    match fetch_tracks(&token, &query, limit).await {
        Ok(tracks) if tracks.is_empty() => warning!("No tracks found for '{}'", query),
        Ok(tracks) => {
            let rows: Vec<TrackTableRow> = tracks
                .iter()
                .enumerate()
                .map(|(i, t)| overview_row(i, t))
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => warning!("Search failed. Err: {}", e),
    }
}

/// Runs a search behind a spinner.
pub(crate) async fn fetch_tracks(
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<TrackRecord>, reqwest::Error> {
    let pb = spinner(format!("Searching for '{}'...", query));
    let result = spotify::search::search_tracks(token, query, limit).await;
    pb.finish_and_clear();
    result
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

// The one-shot search has no playback, so the toggle column only marks
// which tracks could be previewed in a session.
fn overview_row(index: usize, track: &TrackRecord) -> TrackTableRow {
    TrackTableRow {
        position: (index + 1).to_string(),
        toggle: (if track.has_preview() { "♪" } else { "" }).to_string(),
        name: track.name.clone(),
        artist: track.artist.clone(),
        album: track.album.clone(),
        duration: track.duration.clone(),
        action: String::new(),
    }
}
