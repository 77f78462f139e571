mod common;

use tempfile::TempDir;
use tidyli_core::{load_from_dir, Category, Decision, Direction};
use tidyli_review::{
    export, DecisionStore, ExportError, FilterView, JsonFileStorage, Stats, Swipe,
};

#[test]
fn test_load_export_directory() {
    let temp = TempDir::new().unwrap();
    common::write_export(temp.path());

    let loaded = load_from_dir(temp.path()).unwrap();

    // Dan's row is too short
    assert_eq!(loaded.profiles.len(), 4);
    assert_eq!(loaded.report.skipped_profile_rows, 1);

    let ann = &loaded.profiles[0];
    assert_eq!(ann.profile_picture.as_deref(), Some("https://img/ann.jpg"));
    assert_eq!(ann.messages.len(), 2);
    // Newest first
    assert_eq!(ann.messages[0].content, "Fine, thanks");
    assert_eq!(ann.messages[0].direction, Direction::Incoming);
    assert_eq!(ann.messages[1].direction, Direction::Outgoing);

    let bob = &loaded.profiles[1];
    assert_eq!(bob.messages.len(), 1);
    assert_eq!(bob.messages[0].folder, "SENT");
}

#[test]
fn test_review_session_survives_restart() {
    let temp = TempDir::new().unwrap();
    common::write_export(&temp.path().join("data"));
    let decisions = temp.path().join("state/profile_decisions.json");

    let profiles = load_from_dir(&temp.path().join("data")).unwrap().profiles;

    {
        let mut store =
            DecisionStore::open(Box::new(JsonFileStorage::new(&decisions))).unwrap();
        let mut view = FilterView::new(Category::Pending);

        assert_eq!(
            view.swipe(Swipe::Right, &profiles, &mut store, 1).unwrap(),
            Some(Decision::Keep)
        );
        assert_eq!(
            view.swipe(Swipe::Left, &profiles, &mut store, 2).unwrap(),
            Some(Decision::Remove)
        );
        // Pending now holds Cat and Eve; the cursor moved onto Cat
        assert_eq!(view.current(&profiles, &store).unwrap().first_name, "Cat");
    }

    let store = DecisionStore::open(Box::new(JsonFileStorage::new(&decisions))).unwrap();
    assert_eq!(store.get("https://l.in/ann"), Decision::Keep);
    assert_eq!(store.get("https://l.in/bob"), Decision::Remove);
    assert_eq!(store.get("https://l.in/cat"), Decision::Pending);

    let stats = Stats::compute(&profiles, &store);
    assert_eq!((stats.keep, stats.remove, stats.pending), (1, 1, 2));
    assert_eq!(stats.total(), profiles.len());
}

#[test]
fn test_moving_back_to_pending_and_exporting() {
    let temp = TempDir::new().unwrap();
    common::write_export(temp.path());
    let profiles = load_from_dir(temp.path()).unwrap().profiles;
    let decisions = temp.path().join("profile_decisions.json");

    let mut store = DecisionStore::open(Box::new(JsonFileStorage::new(&decisions))).unwrap();
    store.set("https://l.in/eve", Decision::Remove, 10).unwrap();
    store.set("https://l.in/cat", Decision::Remove, 11).unwrap();

    let mut view = FilterView::new(Category::Remove);
    assert_eq!(view.swipe(Swipe::Left, &profiles, &mut store, 12).unwrap(), None);
    assert_eq!(
        view.swipe(Swipe::Right, &profiles, &mut store, 13).unwrap(),
        Some(Decision::Pending)
    );
    assert_eq!(store.get("https://l.in/cat"), Decision::Pending);

    let file = export(&profiles, &store, Category::Remove).unwrap();
    assert_eq!(file.file_name, "linkedin_profiles_to_remove.txt");
    assert_eq!(file.contents, "https://l.in/eve\n");

    let path = file.write_to(&temp.path().join("out")).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "https://l.in/eve\n");

    assert_eq!(
        export(&profiles, &store, Category::Keep),
        Err(ExportError::EmptyCategory(Category::Keep))
    );
}

#[test]
fn test_duplicate_records_resolve_to_latest() {
    let temp = TempDir::new().unwrap();
    let decisions = temp.path().join("profile_decisions.json");
    std::fs::write(
        &decisions,
        r#"[
            {"profileUrl": "https://l.in/ann", "decision": "keep", "timestamp": 5},
            {"profileUrl": "https://l.in/ann", "decision": "remove", "timestamp": 9},
            {"profileUrl": "https://l.in/bob", "decision": "remove", "timestamp": 7},
            {"profileUrl": "https://l.in/bob", "decision": "keep", "timestamp": 3}
        ]"#,
    )
    .unwrap();

    let store = DecisionStore::open(Box::new(JsonFileStorage::new(&decisions))).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("https://l.in/ann"), Decision::Remove);
    assert_eq!(store.get("https://l.in/bob"), Decision::Remove);
}
