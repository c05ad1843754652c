mod common;

use common::track;
use splaycli::management::{DEFAULT_PLAYLIST_NAME, PlaylistDraft};

#[test]
fn test_new_draft_is_empty() {
    let draft = PlaylistDraft::new();

    assert!(draft.is_empty());
    assert_eq!(draft.name(), DEFAULT_PLAYLIST_NAME);
    assert!(!draft.is_saveable());
}

#[test]
fn test_draft_keeps_add_order_and_duplicates() {
    let mut draft = PlaylistDraft::new();
    draft
        .add(track("1", None))
        .add(track("2", Some("b.mp3")))
        .add(track("1", None));

    assert_eq!(draft.len(), 3);
    assert_eq!(
        draft.uris(),
        vec![
            "spotify:track:1".to_string(),
            "spotify:track:2".to_string(),
            "spotify:track:1".to_string()
        ]
    );
}

#[test]
fn test_remove_by_position() {
    let mut draft = PlaylistDraft::new();
    draft.add(track("1", None)).add(track("2", None)).add(track("1", None));

    let removed = draft.remove(0).unwrap();
    assert_eq!(removed.id, "1");

    let ids: Vec<&str> = draft.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert!(draft.remove(5).is_none());
}

#[test]
fn test_saveable_needs_name_and_tracks() {
    let mut draft = PlaylistDraft::new();
    draft.add(track("1", None));
    assert!(draft.is_saveable());

    draft.rename("   ");
    assert!(!draft.is_saveable());

    draft.rename(" Road trip ");
    assert_eq!(draft.name(), "Road trip");
    assert!(draft.is_saveable());

    draft.clear();
    assert!(!draft.is_saveable());
    assert_eq!(draft.name(), "Road trip");
}

#[test]
fn test_reset_restores_defaults() {
    let mut draft = PlaylistDraft::new();
    draft.rename("Road trip");
    draft.add(track("1", None));

    draft.reset();

    assert!(draft.is_empty());
    assert_eq!(draft.name(), DEFAULT_PLAYLIST_NAME);
}

#[test]
fn test_attached_remote_is_reused_until_renamed() {
    let mut draft = PlaylistDraft::new();
    draft.rename("Road trip");
    draft.add(track("1", None));
    assert_eq!(draft.remote_id(), None);

    draft.attach_remote("pl-123");
    assert_eq!(draft.remote_id(), Some("pl-123"));

    // editing the tracks keeps the target, the name is what it was created with
    draft.add(track("2", None));
    assert_eq!(draft.remote_id(), Some("pl-123"));

    draft.rename("Night drive");
    assert_eq!(draft.remote_id(), None);
    draft.rename("Road trip");
    assert_eq!(draft.remote_id(), Some("pl-123"));
}

#[test]
fn test_reset_forgets_remote() {
    let mut draft = PlaylistDraft::new();
    draft.add(track("1", None));
    draft.attach_remote("pl-123");

    draft.reset();
    assert_eq!(draft.remote_id(), None);
}
