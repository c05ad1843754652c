use std::rc::Rc;

use crate::types::{RowAction, TrackRecord, TrackTableRow};

use super::{
    audio::{AudioBackend, AudioHandle, ResourceStatus},
    coordinator::PlaybackCoordinator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Playing,
}

/// Everything that can move a row between [`RowState`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// The user activated the play/pause control.
    UserToggle,
    /// The clip played to its end.
    ResourceEnded,
    /// The clip failed to load or play.
    ResourceErrored { reason: String },
    /// Another row took the channel and paused this row's resource.
    ExternallyStopped,
    /// The row is being dropped.
    Destroyed,
}

/// One track on screen, with an optional preview control.
///
/// A row without a preview URL has no handle: it renders no control and
/// never talks to the coordinator. Dropping a row stops its resource and, if
/// it holds the channel, releases it.
pub struct TrackRow {
    track: TrackRecord,
    action: RowAction,
    state: RowState,
    handle: Option<Rc<dyn AudioHandle>>,
    coordinator: Rc<PlaybackCoordinator>,
    failure: Option<String>,
}

impl TrackRow {
    pub fn new(
        track: TrackRecord,
        action: RowAction,
        coordinator: Rc<PlaybackCoordinator>,
        backend: &dyn AudioBackend,
    ) -> Self {
        let handle = track.preview_url.as_deref().map(|url| backend.open(url));
        Self {
            track,
            action,
            state: RowState::Idle,
            handle,
            coordinator,
            failure: None,
        }
    }

    pub fn track(&self) -> &TrackRecord {
        &self.track
    }

    pub fn action(&self) -> RowAction {
        self.action
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == RowState::Playing
    }

    pub fn has_toggle(&self) -> bool {
        self.handle.is_some()
    }

    /// Reason the last preview attempt failed, cleared by the next toggle.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn toggle(&mut self) {
        self.dispatch(RowEvent::UserToggle);
    }

    /// Applies `event` to the row.
    pub fn dispatch(&mut self, event: RowEvent) {
        let Some(handle) = self.handle.clone() else {
            return;
        };

        match (self.state, event) {
            (RowState::Idle, RowEvent::UserToggle) => {
                self.failure = None;
                self.coordinator.acquire(&self.track.id, Rc::clone(&handle));
                match handle.start() {
                    Ok(()) => self.state = RowState::Playing,
                    Err(e) => {
                        self.release(&handle);
                        self.failure = Some(e.to_string());
                    }
                }
            }
            (RowState::Playing, RowEvent::UserToggle) => {
                self.release(&handle);
                let _ = handle.stop();
                self.state = RowState::Idle;
            }
            (RowState::Playing, RowEvent::ResourceEnded) => {
                self.release(&handle);
                self.state = RowState::Idle;
            }
            (RowState::Playing, RowEvent::ResourceErrored { reason }) => {
                self.release(&handle);
                let _ = handle.stop();
                self.failure = Some(reason);
                self.state = RowState::Idle;
            }
            (RowState::Playing, RowEvent::ExternallyStopped) => {
                self.state = RowState::Idle;
            }
            (RowState::Playing, RowEvent::Destroyed) => {
                let _ = handle.stop();
                self.release(&handle);
                self.state = RowState::Idle;
            }
            (RowState::Idle, RowEvent::Destroyed) => {
                let _ = handle.stop();
            }
            (RowState::Idle, _) => {}
        }
    }

    /// Reconciles the local state with the resource and fires the matching
    /// event, if any.
    pub fn poll(&mut self) -> Option<RowEvent> {
        if self.state != RowState::Playing {
            return None;
        }
        let status = self.handle.as_ref()?.status();

        let event = match status {
            ResourceStatus::Playing => return None,
            ResourceStatus::Stopped => RowEvent::ExternallyStopped,
            ResourceStatus::Ended => RowEvent::ResourceEnded,
            ResourceStatus::Failed(reason) => RowEvent::ResourceErrored { reason },
        };
        self.dispatch(event.clone());
        Some(event)
    }

    pub fn render(&self, position: String) -> TrackTableRow {
        let toggle = match (&self.handle, self.state, &self.failure) {
            (None, _, _) => "",
            (Some(_), RowState::Playing, _) => "■",
            (Some(_), RowState::Idle, Some(_)) => "!",
            (Some(_), RowState::Idle, None) => "▶",
        };

        TrackTableRow {
            position,
            toggle: toggle.to_string(),
            name: self.track.name.clone(),
            artist: self.track.artist.clone(),
            album: self.track.album.clone(),
            duration: self.track.duration.clone(),
            action: self.action.to_string(),
        }
    }

    // Only the row whose handle is registered may release: a row sharing this
    // track id in the other collection must keep its registration.
    fn release(&self, handle: &Rc<dyn AudioHandle>) {
        if self.coordinator.holds(handle) {
            self.coordinator.release(&self.track.id);
        }
    }
}

impl Drop for TrackRow {
    fn drop(&mut self) {
        self.dispatch(RowEvent::Destroyed);
    }
}
