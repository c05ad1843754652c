//! # Playback Module
//!
//! This module implements preview playback for splaycli. Any number of track
//! rows may be on screen at once, spread over the search results and the
//! playlist draft, and each of them may own a 30-second preview clip. The
//! module guarantees that at most one of those clips is audible at any time.
//!
//! ## Architecture
//!
//! ```text
//! TrackList (results / playlist)
//!     ↓ owns
//! TrackRow ── Idle/Playing state machine, one per track
//!     ↓ acquire / release          ↓ start / stop / status
//! PlaybackCoordinator          AudioHandle (rodio sink or muted)
//! ```
//!
//! - [`coordinator`] - The single registration slot. `acquire` stops whoever
//!   held the slot before, `release` only clears the slot if the caller still
//!   holds it.
//! - [`row`] - Per-track state machine driven by a closed set of
//!   [`RowEvent`]s. Dropping a row is the cleanup path.
//! - [`audio`] - The [`AudioHandle`] / [`AudioBackend`] seam and the rodio
//!   implementation used by the interactive session.
//! - [`list`] - Containers owning rows for one collection.
//!
//! ## Execution model
//!
//! Everything here runs on the session's single event loop. Rows and the
//! coordinator are shared with `Rc` and `RefCell`; nothing is `Send`. Audio
//! completion and download errors happen on rodio and loader threads, but are
//! only observed when the event loop polls [`TrackRow::poll`], so every state
//! change is serialized with user input.
//!
//! ## Error handling
//!
//! Nothing in this module returns an error to the session. A failed preview
//! sends the row back to `Idle` with a note rendered next to the track; a
//! stale release is a silent no-op.

pub mod audio;
pub mod coordinator;
pub mod list;
pub mod row;

pub use audio::{
    AudioBackend, AudioHandle, MutedBackend, PlaybackError, PreviewStream, ResourceStatus,
    RodioBackend,
};
pub use coordinator::PlaybackCoordinator;
pub use list::TrackList;
pub use row::{RowEvent, RowState, TrackRow};
