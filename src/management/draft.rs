use crate::types::TrackRecord;

pub const DEFAULT_PLAYLIST_NAME: &str = "New Playlist";

/// The playlist being assembled, held in memory until it is saved.
///
/// Tracks keep the order they were added in; the same track may appear more
/// than once.
#[derive(Debug, Clone)]
pub struct PlaylistDraft {
    name: String,
    tracks: Vec<TrackRecord>,
    remote: Option<RemotePlaylist>,
}

/// A playlist created remotely for this draft whose tracks never arrived.
#[derive(Debug, Clone)]
struct RemotePlaylist {
    id: String,
    name: String,
}

impl Default for PlaylistDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistDraft {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            tracks: Vec::new(),
            remote: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn add(&mut self, track: TrackRecord) -> &mut Self {
        self.tracks.push(track);
        self
    }

    pub fn remove(&mut self, index: usize) -> Option<TrackRecord> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Resets the draft to its initial state after a successful save.
    pub fn reset(&mut self) {
        self.name = DEFAULT_PLAYLIST_NAME.to_string();
        self.tracks.clear();
        self.remote = None;
    }

    /// Remembers a playlist that was created for this draft but is still
    /// empty, so the next save fills it instead of creating another one.
    pub fn attach_remote(&mut self, playlist_id: &str) {
        self.remote = Some(RemotePlaylist {
            id: playlist_id.to_string(),
            name: self.name.clone(),
        });
    }

    /// The attached remote playlist, as long as the draft was not renamed
    /// since it was created.
    pub fn remote_id(&self) -> Option<&str> {
        self.remote
            .as_ref()
            .filter(|r| r.name == self.name)
            .map(|r| r.id.as_str())
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the draft can be saved: it needs a name and at least one track.
    pub fn is_saveable(&self) -> bool {
        !self.name.is_empty() && !self.tracks.is_empty()
    }
}
