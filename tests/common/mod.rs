#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use splaycli::{
    playback::{AudioBackend, AudioHandle, PlaybackError, ResourceStatus},
    types::TrackRecord,
};

/// Audio handle that records calls instead of making noise.
pub struct FakeHandle {
    pub url: String,
    status: RefCell<ResourceStatus>,
    pub starts: Cell<usize>,
    pub stops: Cell<usize>,
    pub fail_start: Cell<bool>,
    pub fail_stop: Cell<bool>,
}

impl FakeHandle {
    pub fn new(url: &str) -> Rc<Self> {
        Rc::new(Self {
            url: url.to_string(),
            status: RefCell::new(ResourceStatus::Stopped),
            starts: Cell::new(0),
            stops: Cell::new(0),
            fail_start: Cell::new(false),
            fail_stop: Cell::new(false),
        })
    }

    pub fn is_playing(&self) -> bool {
        *self.status.borrow() == ResourceStatus::Playing
    }

    pub fn finish(&self) {
        *self.status.borrow_mut() = ResourceStatus::Ended;
    }

    pub fn fail(&self, reason: &str) {
        *self.status.borrow_mut() = ResourceStatus::Failed(reason.to_string());
    }
}

impl AudioHandle for FakeHandle {
    fn start(&self) -> Result<(), PlaybackError> {
        self.starts.set(self.starts.get() + 1);
        if self.fail_start.get() {
            return Err(PlaybackError::NoOutput("fake device".to_string()));
        }
        *self.status.borrow_mut() = ResourceStatus::Playing;
        Ok(())
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        self.stops.set(self.stops.get() + 1);
        if self.fail_stop.get() {
            return Err(PlaybackError::Detached);
        }
        let mut status = self.status.borrow_mut();
        if *status == ResourceStatus::Playing {
            *status = ResourceStatus::Stopped;
        }
        Ok(())
    }

    fn status(&self) -> ResourceStatus {
        self.status.borrow().clone()
    }
}

/// Backend handing out [`FakeHandle`]s and remembering them in open order.
#[derive(Clone, Default)]
pub struct FakeBackend {
    opened: Rc<RefCell<Vec<Rc<FakeHandle>>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> usize {
        self.opened.borrow().len()
    }

    /// The `n`-th handle opened for `url`.
    pub fn handle(&self, url: &str, n: usize) -> Rc<FakeHandle> {
        self.opened
            .borrow()
            .iter()
            .filter(|h| h.url == url)
            .nth(n)
            .cloned()
            .expect("handle was never opened")
    }

    pub fn playing(&self) -> usize {
        self.opened.borrow().iter().filter(|h| h.is_playing()).count()
    }
}

impl AudioBackend for FakeBackend {
    fn open(&self, preview_url: &str) -> Rc<dyn AudioHandle> {
        let handle = FakeHandle::new(preview_url);
        self.opened.borrow_mut().push(Rc::clone(&handle));
        handle
    }
}

pub fn track(id: &str, preview: Option<&str>) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        uri: format!("spotify:track:{}", id),
        duration: "3:30".to_string(),
        preview_url: preview.map(str::to_string),
    }
}
