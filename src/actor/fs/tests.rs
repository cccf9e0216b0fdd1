use std::path::PathBuf;
use std::time::Duration;

use super::debouncer::{ChangeKind, DEBOUNCE_MS, Debouncer, REBUILD_COOLDOWN_MS};

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

#[test]
fn test_debouncer_empty() {
    let debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
}

#[test]
fn test_event_routing_by_kind() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/b.liquid"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/c.liquid"], remove_kind()));

    assert_eq!(debouncer.pending.len(), 3);
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Created
    );
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/b.liquid")],
        ChangeKind::Modified
    );
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/c.liquid")],
        ChangeKind::Removed
    );
}

#[test]
fn test_temp_file_ignored() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/real.liquid"], modify_kind()));
    assert!(debouncer.last_seen.is_some());
    let first_time = debouncer.last_seen.unwrap();

    std::thread::sleep(Duration::from_millis(5));

    // A swap file must neither enter the pending set nor refresh the timer
    debouncer.add_event(&make_event(vec!["/tmp/.theme.liquid.swp"], modify_kind()));
    assert_eq!(debouncer.last_seen.unwrap(), first_time);
    assert_eq!(debouncer.pending.len(), 1);
}

#[test]
fn test_dedup_first_event_wins() {
    let mut debouncer = Debouncer::new();

    // Create followed by modify on the same path keeps the create
    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], modify_kind()));

    assert_eq!(debouncer.pending.len(), 1);
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Created
    );
}

#[test]
fn test_dedup_same_event() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(
        vec!["/tmp/a.liquid", "/tmp/a.liquid"],
        modify_kind(),
    ));
    assert_eq!(debouncer.pending.len(), 1);
}

#[test]
fn test_sleep_duration_no_events() {
    let debouncer = Debouncer::new();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_sleep_duration_after_event() {
    let mut debouncer = Debouncer::new();
    debouncer.last_seen = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(DEBOUNCE_MS - 10));
    assert!(dur <= Duration::from_millis(DEBOUNCE_MS + 10));
}

#[test]
fn test_sleep_duration_respects_cooldown() {
    let mut debouncer = Debouncer::new();
    debouncer.last_seen = Some(std::time::Instant::now());
    debouncer.last_build = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(REBUILD_COOLDOWN_MS - 10));
    assert!(dur <= Duration::from_millis(REBUILD_COOLDOWN_MS + 10));
}

#[test]
fn test_remove_then_create_restores() {
    let mut debouncer = Debouncer::new();

    // Remove then create is the save-via-rename shape: the create wins
    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], remove_kind()));
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Removed
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], create_kind()));
    assert_eq!(debouncer.pending.len(), 1);
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Created
    );
}

#[test]
fn test_create_then_remove_discards() {
    let mut debouncer = Debouncer::new();

    // A file that appeared and vanished within one window never happened
    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], create_kind()));
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Created
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], remove_kind()));
    assert!(
        debouncer.pending.is_empty(),
        "create followed by remove should leave nothing pending"
    );
}

#[test]
fn test_modify_then_remove_upgrades() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.liquid"], remove_kind()));
    assert_eq!(debouncer.pending.len(), 1);
    assert_eq!(
        debouncer.pending[&PathBuf::from("/tmp/a.liquid")],
        ChangeKind::Removed
    );
}

#[test]
fn test_metadata_only_change_ignored() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(
        vec!["/tmp/a.liquid"],
        notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
            notify::event::MetadataKind::Any,
        )),
    ));
    assert!(debouncer.pending.is_empty());
}
