use reqwest::Client;

use crate::{
    config,
    types::{SearchResponse, TrackRecord},
};

use super::send;

/// Searches the Spotify catalog for tracks matching `query`.
///
/// Results are normalized into [`TrackRecord`]s in the order Spotify ranks
/// them. Tracks without a preview clip are kept; they simply get no play
/// control.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `query` - Free-text query, passed through to Spotify's search syntax
/// * `limit` - Maximum number of tracks to return (1-50)
///
/// # API Endpoint
///
/// `GET /search?type=track&q={query}&limit={limit}`
///
/// # Example
///
/// ```
/// let tracks = search_tracks(&token, "daft punk", 20).await?;
/// let previewable = tracks.iter().filter(|t| t.has_preview()).count();
/// ```
pub async fn search_tracks(
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<TrackRecord>, reqwest::Error> {
    let limit = limit.to_string();
    let client = Client::new();
    let request = client
        .get(format!("{uri}/search", uri = config::spotify_apiurl()))
        .query(&[
            ("type", "track"),
            ("q", query),
            ("limit", limit.as_str()),
        ])
        .bearer_auth(token);

    let response = send(request).await?;
    let json = response.json::<SearchResponse>().await?;

    Ok(json.tracks.items.into_iter().map(TrackRecord::from).collect())
}
