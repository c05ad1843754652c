mod common;

use std::rc::Rc;

use common::{FakeBackend, track};
use splaycli::{
    playback::{PlaybackCoordinator, RowEvent, RowState, TrackRow},
    types::RowAction,
};

fn row(
    id: &str,
    preview: Option<&str>,
    coordinator: &Rc<PlaybackCoordinator>,
    backend: &FakeBackend,
) -> TrackRow {
    TrackRow::new(
        track(id, preview),
        RowAction::Add,
        Rc::clone(coordinator),
        backend,
    )
}

#[test]
fn test_row_starts_idle() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let row = row("1", Some("a.mp3"), &coordinator, &backend);

    assert_eq!(row.state(), RowState::Idle);
    assert!(row.has_toggle());
    assert_eq!(row.failure(), None);
}

#[test]
fn test_toggle_plays_and_pauses() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);
    let handle = backend.handle("a.mp3", 0);

    row.toggle();
    assert_eq!(row.state(), RowState::Playing);
    assert!(handle.is_playing());
    assert_eq!(coordinator.current(), Some("1".to_string()));

    row.toggle();
    assert_eq!(row.state(), RowState::Idle);
    assert!(!handle.is_playing());
    assert_eq!(coordinator.current(), None);
}

#[test]
fn test_row_without_preview_has_no_control() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("2", None, &coordinator, &backend);

    assert!(!row.has_toggle());
    assert_eq!(backend.opened(), 0);

    row.toggle();
    assert_eq!(row.state(), RowState::Idle);
    assert_eq!(coordinator.current(), None);
    assert_eq!(row.render("r2".to_string()).toggle, "");
}

#[test]
fn test_natural_end_releases() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);

    row.toggle();
    backend.handle("a.mp3", 0).finish();

    assert_eq!(row.poll(), Some(RowEvent::ResourceEnded));
    assert_eq!(row.state(), RowState::Idle);
    assert_eq!(coordinator.current(), None);
    // nothing left to report once idle
    assert_eq!(row.poll(), None);
}

#[test]
fn test_playback_error_returns_to_idle_without_retry() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);
    let handle = backend.handle("a.mp3", 0);

    row.toggle();
    handle.fail("404 Not Found");

    assert_eq!(
        row.poll(),
        Some(RowEvent::ResourceErrored {
            reason: "404 Not Found".to_string()
        })
    );
    assert_eq!(row.state(), RowState::Idle);
    assert_eq!(row.failure(), Some("404 Not Found"));
    assert_eq!(coordinator.current(), None);
    assert_eq!(handle.starts.get(), 1);
    assert_eq!(row.render("r1".to_string()).toggle, "!");

    // the next toggle is a fresh attempt and clears the note
    row.toggle();
    assert_eq!(row.failure(), None);
    assert_eq!(handle.starts.get(), 2);
}

#[test]
fn test_failed_start_stays_idle() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);
    backend.handle("a.mp3", 0).fail_start.set(true);

    row.toggle();

    assert_eq!(row.state(), RowState::Idle);
    assert!(row.failure().is_some());
    assert_eq!(coordinator.current(), None);
}

#[test]
fn test_other_row_stops_this_one() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut first = row("1", Some("a.mp3"), &coordinator, &backend);
    let mut second = row("3", Some("c.mp3"), &coordinator, &backend);

    first.toggle();
    second.toggle();

    assert!(!backend.handle("a.mp3", 0).is_playing());
    assert_eq!(first.poll(), Some(RowEvent::ExternallyStopped));
    assert_eq!(first.state(), RowState::Idle);
    assert_eq!(second.state(), RowState::Playing);
    assert_eq!(coordinator.current(), Some("3".to_string()));
    assert_eq!(backend.playing(), 1);
}

#[test]
fn test_dropping_playing_row_cleans_up() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);
    let handle = backend.handle("a.mp3", 0);

    row.toggle();
    drop(row);

    assert!(!handle.is_playing());
    assert_eq!(coordinator.current(), None);
}

#[test]
fn test_dropping_idle_row_keeps_registration() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut playing = row("1", Some("a.mp3"), &coordinator, &backend);
    let idle = row("3", Some("c.mp3"), &coordinator, &backend);

    playing.toggle();
    drop(idle);

    assert_eq!(coordinator.current(), Some("1".to_string()));
    assert!(backend.handle("a.mp3", 0).is_playing());
}

#[test]
fn test_duplicate_ids_do_not_release_each_other() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut in_results = row("1", Some("a.mp3"), &coordinator, &backend);
    let mut in_playlist = row("1", Some("a.mp3"), &coordinator, &backend);

    in_results.toggle();
    in_playlist.toggle();

    // the results row lost the channel but has not been polled yet
    assert_eq!(in_results.state(), RowState::Playing);
    drop(in_results);

    assert_eq!(coordinator.current(), Some("1".to_string()));
    assert_eq!(in_playlist.state(), RowState::Playing);
    assert!(backend.handle("a.mp3", 1).is_playing());
    assert!(!backend.handle("a.mp3", 0).is_playing());
}

#[test]
fn test_resource_events_ignored_while_idle() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);

    row.dispatch(RowEvent::ResourceEnded);
    row.dispatch(RowEvent::ExternallyStopped);
    assert_eq!(row.state(), RowState::Idle);
    assert_eq!(coordinator.current(), None);
}

#[test]
fn test_render_reflects_state() {
    let coordinator = PlaybackCoordinator::new();
    let backend = FakeBackend::new();
    let mut row = row("1", Some("a.mp3"), &coordinator, &backend);

    let idle = row.render("r1".to_string());
    assert_eq!(idle.toggle, "▶");
    assert_eq!(idle.position, "r1");
    assert_eq!(idle.action, "+");
    assert_eq!(idle.name, "Track 1");

    row.toggle();
    assert_eq!(row.render("r1".to_string()).toggle, "■");
}
