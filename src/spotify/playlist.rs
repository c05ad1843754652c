use reqwest::Client;

use crate::{
    config,
    types::{AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse},
};

use super::send;

/// Maximum number of URIs accepted by a single add-tracks request.
pub const ADD_TRACKS_CHUNK: usize = 100;

/// Creates an empty private playlist for `user_id`.
///
/// # API Endpoint
///
/// `POST /users/{user_id}/playlists`
pub async fn create(
    token: &str,
    user_id: &str,
    name: &str,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let client = Client::new();
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: format!("Created with {}", env!("CARGO_PKG_NAME")),
        public: false,
        collaborative: false,
    };

    let request = client
        .post(format!(
            "{uri}/users/{user_id}/playlists",
            uri = config::spotify_apiurl(),
            user_id = user_id
        ))
        .bearer_auth(token)
        .json(&body);

    send(request).await?.json::<CreatePlaylistResponse>().await
}

/// Appends `uris` to a playlist, in order.
///
/// The URIs are sent in chunks of [`ADD_TRACKS_CHUNK`]; the snapshot id of
/// the last chunk is returned.
///
/// # API Endpoint
///
/// `POST /playlists/{playlist_id}/tracks`
pub async fn add_tracks(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<Option<String>, reqwest::Error> {
    let client = Client::new();
    let url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config::spotify_apiurl(),
        id = playlist_id
    );

    let mut snapshot_id = None;
    for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
        let body = AddTracksRequest {
            uris: chunk.to_vec(),
        };
        let request = client.post(&url).bearer_auth(token).json(&body);
        let response = send(request).await?.json::<AddTracksResponse>().await?;
        snapshot_id = Some(response.snapshot_id);
    }

    Ok(snapshot_id)
}
