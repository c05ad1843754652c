use std::{cell::RefCell, rc::Rc};

use super::audio::AudioHandle;

struct Registration {
    track_id: String,
    handle: Rc<dyn AudioHandle>,
}

/// Arbitrates the single audio channel shared by every track row.
///
/// One instance is created per session and handed to each row as an
/// `Rc<PlaybackCoordinator>`. The slot holds zero or one registration and is
/// only ever changed through [`acquire`](Self::acquire) and
/// [`release`](Self::release).
#[derive(Default)]
pub struct PlaybackCoordinator {
    slot: RefCell<Option<Registration>>,
}

impl PlaybackCoordinator {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Registers `handle` as the one audible stream for `track_id`.
    ///
    /// Whatever held the slot before is stopped first. Re-acquiring with the
    /// registration already in place does nothing, so the handle is never
    /// stopped and restarted by its own request. A different handle with the
    /// same track id (the same track listed in both collections) still takes
    /// the slot over and silences the previous one.
    ///
    /// Stopping the previous handle is best-effort; a failure there does not
    /// prevent the new registration.
    pub fn acquire(&self, track_id: &str, handle: Rc<dyn AudioHandle>) {
        let previous = {
            let mut slot = self.slot.borrow_mut();
            if let Some(current) = slot.as_ref() {
                if current.track_id == track_id && Rc::ptr_eq(&current.handle, &handle) {
                    return;
                }
            }
            slot.replace(Registration {
                track_id: track_id.to_string(),
                handle,
            })
        };

        // stop outside the borrow, a handle may call back into the coordinator
        if let Some(previous) = previous {
            let _ = previous.handle.stop();
        }
    }

    /// Clears the registration if `track_id` still holds it.
    ///
    /// A release for a track that has since been displaced, or on an empty
    /// slot, is a no-op.
    pub fn release(&self, track_id: &str) {
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref().is_some_and(|r| r.track_id == track_id) {
            *slot = None;
        }
    }

    /// Track id currently holding the slot.
    pub fn current(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|r| r.track_id.clone())
    }

    pub fn is_registered(&self, track_id: &str) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|r| r.track_id == track_id)
    }

    /// Whether `handle` is the registered handle, compared by identity.
    pub fn holds(&self, handle: &Rc<dyn AudioHandle>) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|r| Rc::ptr_eq(&r.handle, handle))
    }
}
