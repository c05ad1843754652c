use reqwest::Client;

use crate::{config, types::CurrentUser};

use super::send;

/// Returns the Spotify user id of the account behind `token`.
///
/// Playlists are created under this id.
pub async fn current_user_id(token: &str) -> Result<String, reqwest::Error> {
    let client = Client::new();
    let request = client
        .get(format!("{uri}/me", uri = config::spotify_apiurl()))
        .bearer_auth(token);

    let user = send(request).await?.json::<CurrentUser>().await?;
    Ok(user.id)
}
