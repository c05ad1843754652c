use thiserror::Error;

use crate::{
    management::{PlaylistDraft, TokenManager},
    spotify, success,
};

use super::search::spinner;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("the playlist needs a name and at least one track")]
    NotSaveable,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The playlist exists remotely but is empty.
    #[error("playlist {playlist_id} was created but its tracks could not be added: {source}")]
    TracksNotAdded {
        playlist_id: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Saves `draft` as a private playlist and returns its id.
///
/// A draft with an attached remote playlist is saved into that playlist
/// instead of a new one. The draft itself is left untouched; the caller
/// decides what to do with it once the round-trip is over.
pub async fn save_playlist(
    token_mgr: &mut TokenManager,
    draft: &PlaylistDraft,
) -> Result<String, SaveError> {
    if !draft.is_saveable() {
        return Err(SaveError::NotSaveable);
    }

    let pb = spinner(format!("Saving playlist '{}'...", draft.name()));
    let result = create_with_tracks(token_mgr, draft).await;
    pb.finish_and_clear();

    let playlist_id = result?;
    success!(
        "Playlist '{}' saved with {} tracks.",
        draft.name(),
        draft.len()
    );
    Ok(playlist_id)
}

async fn create_with_tracks(
    token_mgr: &mut TokenManager,
    draft: &PlaylistDraft,
) -> Result<String, SaveError> {
    let token = token_mgr.get_valid_token().await;

    let playlist_id = match draft.remote_id() {
        Some(id) => id.to_string(),
        None => {
            let user_id = spotify::user::current_user_id(&token).await?;
            spotify::playlist::create(&token, &user_id, draft.name()).await?.id
        }
    };

    match spotify::playlist::add_tracks(&token, &playlist_id, &draft.uris()).await {
        Ok(_) => Ok(playlist_id),
        Err(source) => Err(SaveError::TracksNotAdded {
            playlist_id,
            source,
        }),
    }
}
