use std::rc::Rc;

use crate::types::{Collection, RowAction, TrackRecord, TrackTableRow};

use super::{
    audio::AudioBackend,
    coordinator::PlaybackCoordinator,
    row::{RowEvent, TrackRow},
};

/// Rows for one collection, in display order.
///
/// Rows are dropped, and so cleaned up, whenever they leave the list:
/// `remove`, `replace`, `clear` or dropping the list itself.
pub struct TrackList {
    collection: Collection,
    rows: Vec<TrackRow>,
    coordinator: Rc<PlaybackCoordinator>,
    backend: Rc<dyn AudioBackend>,
}

impl TrackList {
    pub fn new(
        collection: Collection,
        coordinator: Rc<PlaybackCoordinator>,
        backend: Rc<dyn AudioBackend>,
    ) -> Self {
        Self {
            collection,
            rows: Vec::new(),
            coordinator,
            backend,
        }
    }

    pub fn row(&self, index: usize) -> Option<&TrackRow> {
        self.rows.get(index)
    }

    pub fn replace(&mut self, records: &[TrackRecord]) {
        self.rows.clear();
        for record in records {
            self.push(record.clone());
        }
    }

    pub fn push(&mut self, record: TrackRecord) {
        let row = TrackRow::new(
            record,
            self.collection.action(),
            Rc::clone(&self.coordinator),
            &*self.backend,
        );
        self.rows.push(row);
    }

    pub fn remove(&mut self, index: usize) -> Option<TrackRecord> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        Some(row.track().clone())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Toggles the preview of row `index`. Returns `false` when the row does
    /// not exist or has no preview.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if row.has_toggle() => {
                row.toggle();
                true
            }
            _ => false,
        }
    }

    /// Add/remove intent for row `index`, forwarded to the owning collection.
    pub fn intent(&self, index: usize) -> Option<(RowAction, &TrackRecord)> {
        self.rows.get(index).map(|row| (row.action(), row.track()))
    }

    /// Polls every row and returns the events that fired, with track names.
    pub fn poll(&mut self) -> Vec<(String, RowEvent)> {
        self.rows
            .iter_mut()
            .filter_map(|row| row.poll().map(|event| (row.track().name.clone(), event)))
            .collect()
    }

    pub fn table(&self) -> Vec<TrackTableRow> {
        let prefix = self.collection.prefix();
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.render(format!("{}{}", prefix, i + 1)))
            .collect()
    }
}
