mod common;

use std::rc::Rc;

use common::FakeHandle;
use splaycli::playback::{AudioHandle, PlaybackCoordinator};

fn as_dyn(handle: &Rc<FakeHandle>) -> Rc<dyn AudioHandle> {
    handle.clone()
}

#[test]
fn test_acquire_registers_track() {
    let coordinator = PlaybackCoordinator::new();
    let a = FakeHandle::new("a.mp3");

    assert_eq!(coordinator.current(), None);
    coordinator.acquire("1", as_dyn(&a));

    assert_eq!(coordinator.current(), Some("1".to_string()));
    assert!(coordinator.is_registered("1"));
    assert_eq!(a.stops.get(), 0);
}

#[test]
fn test_acquire_stops_previous_holder() {
    let coordinator = PlaybackCoordinator::new();
    let handles: Vec<Rc<FakeHandle>> = (0..4)
        .map(|i| FakeHandle::new(&format!("{}.mp3", i)))
        .collect();

    for (i, handle) in handles.iter().enumerate() {
        handle.start().unwrap();
        coordinator.acquire(&i.to_string(), as_dyn(handle));

        // every earlier handle has been stopped exactly once, the new one never
        for earlier in &handles[..i] {
            assert_eq!(earlier.stops.get(), 1);
            assert!(!earlier.is_playing());
        }
        assert_eq!(handle.stops.get(), 0);
        assert!(handle.is_playing());
        assert_eq!(coordinator.current(), Some(i.to_string()));
    }
}

#[test]
fn test_reacquire_same_registration_is_idempotent() {
    let coordinator = PlaybackCoordinator::new();
    let a = FakeHandle::new("a.mp3");
    a.start().unwrap();

    coordinator.acquire("1", as_dyn(&a));
    coordinator.acquire("1", as_dyn(&a));
    coordinator.acquire("1", as_dyn(&a));

    assert_eq!(a.stops.get(), 0);
    assert!(a.is_playing());
    assert_eq!(coordinator.current(), Some("1".to_string()));
}

#[test]
fn test_same_id_with_other_handle_takes_over() {
    let coordinator = PlaybackCoordinator::new();
    let in_results = FakeHandle::new("a.mp3");
    let in_playlist = FakeHandle::new("a.mp3");
    in_results.start().unwrap();

    coordinator.acquire("1", as_dyn(&in_results));
    in_playlist.start().unwrap();
    coordinator.acquire("1", as_dyn(&in_playlist));

    assert_eq!(in_results.stops.get(), 1);
    assert!(!in_results.is_playing());
    assert!(in_playlist.is_playing());
    assert!(coordinator.holds(&as_dyn(&in_playlist)));
    assert!(!coordinator.holds(&as_dyn(&in_results)));
}

#[test]
fn test_stale_release_keeps_newer_registration() {
    let coordinator = PlaybackCoordinator::new();
    let a = FakeHandle::new("a.mp3");
    let b = FakeHandle::new("b.mp3");

    coordinator.acquire("A", as_dyn(&a));
    coordinator.acquire("B", as_dyn(&b));
    coordinator.release("A");

    assert_eq!(coordinator.current(), Some("B".to_string()));
}

#[test]
fn test_release_clears_matching_registration() {
    let coordinator = PlaybackCoordinator::new();
    let a = FakeHandle::new("a.mp3");

    coordinator.acquire("A", as_dyn(&a));
    coordinator.release("A");

    assert_eq!(coordinator.current(), None);
    // releasing again, or releasing on an empty slot, changes nothing
    coordinator.release("A");
    coordinator.release("B");
    assert_eq!(coordinator.current(), None);
}

#[test]
fn test_failing_stop_does_not_block_acquire() {
    let coordinator = PlaybackCoordinator::new();
    let a = FakeHandle::new("a.mp3");
    let b = FakeHandle::new("b.mp3");
    a.fail_stop.set(true);

    coordinator.acquire("A", as_dyn(&a));
    coordinator.acquire("B", as_dyn(&b));

    assert_eq!(a.stops.get(), 1);
    assert_eq!(coordinator.current(), Some("B".to_string()));
}
