//! Audio resources behind a track row's play control.
//!
//! A row only talks to the [`AudioHandle`] trait. The interactive session uses
//! [`RodioBackend`], which streams the preview clip through the default output
//! device; [`MutedBackend`] stands in when no device can be opened.

use std::{
    cell::RefCell,
    io::Cursor,
    rc::Rc,
    sync::{Arc, Mutex},
    thread,
};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output available: {0}")]
    NoOutput(String),

    #[error("preview download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("preview could not be decoded: {0}")]
    Decode(String),

    #[error("audio handle is detached")]
    Detached,
}

/// What the underlying audio resource is doing right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStatus {
    Stopped,
    Playing,
    /// The clip played to its end.
    Ended,
    /// Loading or decoding the clip failed.
    Failed(String),
}

pub trait AudioHandle {
    fn start(&self) -> Result<(), PlaybackError>;

    /// Pauses the resource. Stopping a stopped resource is a no-op.
    fn stop(&self) -> Result<(), PlaybackError>;

    fn status(&self) -> ResourceStatus;
}

/// Creates one audio handle per previewable row.
pub trait AudioBackend {
    fn open(&self, preview_url: &str) -> Rc<dyn AudioHandle>;
}

pub struct RodioBackend {
    stream: Rc<OutputStream>,
}

impl RodioBackend {
    /// Opens the default output device.
    pub fn open_default() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::NoOutput(e.to_string()))?;
        // rodio prints to stderr when the stream is dropped, which garbles the prompt
        stream.log_on_drop(false);

        Ok(Self {
            stream: Rc::new(stream),
        })
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, preview_url: &str) -> Rc<dyn AudioHandle> {
        Rc::new(PreviewStream::new(preview_url, Rc::clone(&self.stream)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

/// A preview clip played through a rodio [`Sink`].
///
/// The sink is created on the first `start`; the clip is downloaded and
/// decoded on a loader thread and appended once available, so `start` never
/// blocks the event loop. A `start` after the clip ended or failed begins a
/// fresh attempt.
pub struct PreviewStream {
    url: String,
    stream: Rc<OutputStream>,
    sink: RefCell<Option<Arc<Sink>>>,
    load: Arc<Mutex<LoadState>>,
}

impl PreviewStream {
    fn new(url: &str, stream: Rc<OutputStream>) -> Self {
        Self {
            url: url.to_string(),
            stream,
            sink: RefCell::new(None),
            load: Arc::new(Mutex::new(LoadState::Pending)),
        }
    }

    fn load_state(&self) -> LoadState {
        self.load
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|e| LoadState::Failed(e.to_string()))
    }

    fn spawn_loader(&self, sink: Arc<Sink>) {
        let url = self.url.clone();
        let load = Arc::clone(&self.load);
        if let Ok(mut state) = load.lock() {
            *state = LoadState::Pending;
        }

        thread::spawn(move || {
            let next = match fetch_and_append(&url, &sink) {
                Ok(()) => LoadState::Ready,
                Err(e) => LoadState::Failed(e.to_string()),
            };
            if let Ok(mut state) = load.lock() {
                *state = next;
            }
        });
    }
}

fn fetch_and_append(url: &str, sink: &Sink) -> Result<(), PlaybackError> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    let source =
        Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| PlaybackError::Decode(e.to_string()))?;
    sink.append(source);
    Ok(())
}

impl AudioHandle for PreviewStream {
    fn start(&self) -> Result<(), PlaybackError> {
        let has_sink = self.sink.borrow().is_some();

        if needs_fresh_start(&self.status(), has_sink) {
            if let Some(old) = self.sink.borrow_mut().take() {
                old.stop();
            }
            let sink = Arc::new(Sink::connect_new(self.stream.mixer()));
            self.spawn_loader(Arc::clone(&sink));
            *self.sink.borrow_mut() = Some(sink);
        } else if let Some(sink) = self.sink.borrow().as_ref() {
            sink.play();
        }

        Ok(())
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        if let LoadState::Failed(_) = self.load_state() {
            return Err(PlaybackError::Detached);
        }
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink.pause();
        }
        Ok(())
    }

    fn status(&self) -> ResourceStatus {
        match self.sink.borrow().as_ref() {
            Some(sink) => {
                resource_status(&self.load_state(), true, sink.empty(), sink.is_paused())
            }
            None => resource_status(&self.load_state(), false, true, false),
        }
    }
}

/// Maps the loader state and the sink flags onto a [`ResourceStatus`].
///
/// A clip still downloading counts as playing unless it was paused; the row
/// already committed to it.
fn resource_status(load: &LoadState, has_sink: bool, empty: bool, paused: bool) -> ResourceStatus {
    if !has_sink {
        return ResourceStatus::Stopped;
    }
    match load {
        LoadState::Failed(reason) => ResourceStatus::Failed(reason.clone()),
        LoadState::Ready if empty => ResourceStatus::Ended,
        _ if paused => ResourceStatus::Stopped,
        _ => ResourceStatus::Playing,
    }
}

/// Whether `start` must build a new sink and download again rather than
/// resume the existing one.
fn needs_fresh_start(status: &ResourceStatus, has_sink: bool) -> bool {
    match status {
        ResourceStatus::Ended | ResourceStatus::Failed(_) => true,
        ResourceStatus::Stopped | ResourceStatus::Playing => !has_sink,
    }
}

impl Drop for PreviewStream {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.get_mut().take() {
            sink.stop();
        }
    }
}

/// Backend for machines without an output device.
pub struct MutedBackend;

struct MutedHandle;

impl AudioBackend for MutedBackend {
    fn open(&self, _preview_url: &str) -> Rc<dyn AudioHandle> {
        Rc::new(MutedHandle)
    }
}

impl AudioHandle for MutedHandle {
    fn start(&self) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoOutput("audio is muted".to_string()))
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn status(&self) -> ResourceStatus {
        ResourceStatus::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_without_sink_is_stopped() {
        assert_eq!(
            resource_status(&LoadState::Pending, false, true, false),
            ResourceStatus::Stopped
        );
        assert_eq!(
            resource_status(&LoadState::Failed("x".into()), false, true, false),
            ResourceStatus::Stopped
        );
    }

    #[test]
    fn test_pending_clip_reads_as_playing() {
        assert_eq!(
            resource_status(&LoadState::Pending, true, true, false),
            ResourceStatus::Playing
        );
    }

    #[test]
    fn test_paused_clip_reads_as_stopped() {
        assert_eq!(
            resource_status(&LoadState::Pending, true, true, true),
            ResourceStatus::Stopped
        );
        assert_eq!(
            resource_status(&LoadState::Ready, true, false, true),
            ResourceStatus::Stopped
        );
    }

    #[test]
    fn test_ready_clip_playing_until_sink_drains() {
        assert_eq!(
            resource_status(&LoadState::Ready, true, false, false),
            ResourceStatus::Playing
        );
        assert_eq!(
            resource_status(&LoadState::Ready, true, true, false),
            ResourceStatus::Ended
        );
        // a drained sink has ended even if it was paused at the last sample
        assert_eq!(
            resource_status(&LoadState::Ready, true, true, true),
            ResourceStatus::Ended
        );
    }

    #[test]
    fn test_failed_load_carries_reason() {
        assert_eq!(
            resource_status(&LoadState::Failed("HTTP 404".into()), true, true, false),
            ResourceStatus::Failed("HTTP 404".to_string())
        );
    }

    #[test]
    fn test_first_start_is_fresh() {
        assert!(needs_fresh_start(&ResourceStatus::Stopped, false));
    }

    #[test]
    fn test_start_after_pause_resumes() {
        assert!(!needs_fresh_start(&ResourceStatus::Stopped, true));
        assert!(!needs_fresh_start(&ResourceStatus::Playing, true));
    }

    #[test]
    fn test_start_after_end_or_failure_reloads() {
        assert!(needs_fresh_start(&ResourceStatus::Ended, true));
        assert!(needs_fresh_start(
            &ResourceStatus::Failed("decode".into()),
            true
        ));
    }
}
