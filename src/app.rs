//! Session state for the interactive playlist builder.
//!
//! [`App`] keeps the plain track records (search results and the playlist
//! draft) next to the row lists rendered from them, and routes add, remove
//! and play requests to both. It does no I/O, so the whole playback flow can
//! be driven from tests with a fake audio backend.

use std::rc::Rc;

use crate::{
    management::PlaylistDraft,
    playback::{AudioBackend, PlaybackCoordinator, RowEvent, TrackList, TrackRow},
    types::{Collection, RowAction, TrackRecord, TrackTableRow},
};

pub struct App {
    results: Vec<TrackRecord>,
    draft: PlaylistDraft,
    results_view: TrackList,
    playlist_view: TrackList,
    coordinator: Rc<PlaybackCoordinator>,
}

impl App {
    pub fn new(backend: Rc<dyn AudioBackend>) -> Self {
        let coordinator = PlaybackCoordinator::new();
        Self {
            results: Vec::new(),
            draft: PlaylistDraft::new(),
            results_view: TrackList::new(
                Collection::Results,
                Rc::clone(&coordinator),
                Rc::clone(&backend),
            ),
            playlist_view: TrackList::new(Collection::Playlist, Rc::clone(&coordinator), backend),
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &PlaybackCoordinator {
        &self.coordinator
    }

    pub fn results(&self) -> &[TrackRecord] {
        &self.results
    }

    pub fn draft(&self) -> &PlaylistDraft {
        &self.draft
    }

    /// Replaces the search results. Rows of the previous results are dropped,
    /// which stops any preview among them.
    pub fn show_results(&mut self, records: Vec<TrackRecord>) {
        self.results_view.replace(&records);
        self.results = records;
    }

    /// Appends result `index` to the draft.
    pub fn add(&mut self, index: usize) -> Option<TrackRecord> {
        let record = match self.results_view.intent(index)? {
            (RowAction::Add, record) => record.clone(),
            (RowAction::Remove, _) => return None,
        };
        self.draft.add(record.clone());
        self.playlist_view.push(record.clone());
        Some(record)
    }

    /// Removes playlist row `index` from the draft.
    pub fn remove(&mut self, index: usize) -> Option<TrackRecord> {
        if !matches!(self.playlist_view.intent(index)?, (RowAction::Remove, _)) {
            return None;
        }
        let record = self.draft.remove(index)?;
        self.playlist_view.remove(index);
        Some(record)
    }

    pub fn rename(&mut self, name: &str) {
        self.draft.rename(name);
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.playlist_view.clear();
    }

    /// Called when the playlist was created remotely but its tracks were not
    /// added; the next save reuses it.
    pub fn attach_remote(&mut self, playlist_id: &str) {
        self.draft.attach_remote(playlist_id);
    }

    /// Called after the draft was saved remotely.
    pub fn finish_save(&mut self) {
        self.draft.reset();
        self.playlist_view.clear();
    }

    /// Toggles the preview of a row and settles every other row against the
    /// resource it may just have lost. Returns `false` if there is nothing to
    /// toggle at that position.
    ///
    /// Rows are polled first: a clip that ended or failed since the last tick
    /// must read as `Idle`, or the toggle would pause it instead of replaying.
    pub fn toggle(&mut self, collection: Collection, index: usize) -> bool {
        self.poll_playback();
        let toggled = self.view_mut(collection).toggle(index);
        if toggled {
            self.poll_playback();
        }
        toggled
    }

    /// Polls every row for completion, errors and external stops.
    pub fn poll_playback(&mut self) -> Vec<(String, RowEvent)> {
        let mut events = self.results_view.poll();
        events.extend(self.playlist_view.poll());
        events
    }

    pub fn row(&self, collection: Collection, index: usize) -> Option<&TrackRow> {
        self.view(collection).row(index)
    }

    pub fn table(&self, collection: Collection) -> Vec<TrackTableRow> {
        self.view(collection).table()
    }

    fn view(&self, collection: Collection) -> &TrackList {
        match collection {
            Collection::Results => &self.results_view,
            Collection::Playlist => &self.playlist_view,
        }
    }

    fn view_mut(&mut self, collection: Collection) -> &mut TrackList {
        match collection {
            Collection::Results => &mut self.results_view,
            Collection::Playlist => &mut self.playlist_view,
        }
    }
}
