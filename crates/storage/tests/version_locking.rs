#![forbid(unsafe_code)]

use std::path::PathBuf;
use tv_storage::{SqliteStore, StoreError, TaskCreateRequest, TaskEditRequest, ToggleStatusRequest};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("tv_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn create_basic_task(store: &mut SqliteStore, title: &str) -> i64 {
    store
        .create_task(TaskCreateRequest {
            title: title.to_string(),
            ..Default::default()
        })
        .expect("create task")
        .id
}

#[test]
fn version_sequence_is_gapless_across_transitions() {
    let mut store = SqliteStore::open(temp_dir("version_sequence")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Write the quarterly report".to_string(),
            ..Default::default()
        })
        .expect("create task");
    assert_eq!(task.version, 0);

    let task = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(0),
            title: Some("Write the quarterly report draft".to_string()),
            ..Default::default()
        })
        .expect("edit task");
    assert_eq!(task.version, 1);

    let task = store
        .toggle_status(ToggleStatusRequest {
            id: task.id,
            expected_version: Some(1),
            actor_id: None,
        })
        .expect("toggle status");
    assert_eq!(task.version, 2);

    let task = store
        .soft_delete_task(task.id, Some(2), None)
        .expect("soft delete");
    assert_eq!(task.version, 3);

    let task = store.restore_task(task.id, None).expect("restore");
    assert_eq!(task.version, 4);
}

#[test]
fn stale_writer_is_rejected_without_partial_apply() {
    let mut store = SqliteStore::open(temp_dir("stale_writer")).expect("open store");
    let id = create_basic_task(&mut store, "Prepare the launch checklist");

    let task = store
        .edit_task(TaskEditRequest {
            id,
            expected_version: Some(0),
            title: Some("First update wins".to_string()),
            ..Default::default()
        })
        .expect("first edit");
    assert_eq!(task.version, 1);

    let err = store
        .edit_task(TaskEditRequest {
            id,
            expected_version: Some(0),
            title: Some("Stale update loses".to_string()),
            description: Some(Some("should never land".to_string())),
            ..Default::default()
        })
        .expect_err("stale edit must fail");
    match err {
        StoreError::VersionConflict { expected, actual } => {
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("expected version conflict, got {other:?}"),
    }

    let task = store.get_task(id).expect("get task").expect("task exists");
    assert_eq!(task.version, 1);
    assert_eq!(task.title, "First update wins");
    assert_eq!(task.description, None);

    // The rejected write left no audit trace either.
    let logs = store.task_logs(id).expect("logs");
    assert_eq!(logs.len(), 2);
}

#[test]
fn toggle_with_stale_version_conflicts() {
    let mut store = SqliteStore::open(temp_dir("toggle_stale")).expect("open store");
    let id = create_basic_task(&mut store, "Rotate the signing keys");

    store
        .edit_task(TaskEditRequest {
            id,
            expected_version: Some(0),
            priority: Some("high".to_string()),
            ..Default::default()
        })
        .expect("edit");

    let err = store
        .toggle_status(ToggleStatusRequest {
            id,
            expected_version: Some(0),
            actor_id: None,
        })
        .expect_err("stale toggle must fail");
    assert!(matches!(
        err,
        StoreError::VersionConflict {
            expected: 0,
            actual: 1
        }
    ));
}

#[test]
fn unchecked_edit_uses_current_version() {
    let mut store = SqliteStore::open(temp_dir("unchecked_edit")).expect("open store");
    let id = create_basic_task(&mut store, "Catalog the archive shelf");

    for round in 0..3i64 {
        let task = store
            .edit_task(TaskEditRequest {
                id,
                expected_version: None,
                description: Some(Some(format!("round {round}"))),
                ..Default::default()
            })
            .expect("edit");
        assert_eq!(task.version, round + 1);
    }
}

#[test]
fn missing_task_is_unknown_not_conflict() {
    let mut store = SqliteStore::open(temp_dir("missing_task")).expect("open store");
    let err = store
        .edit_task(TaskEditRequest {
            id: 4242,
            expected_version: Some(0),
            title: Some("Nobody home".to_string()),
            ..Default::default()
        })
        .expect_err("edit of missing row must fail");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn example_scenario_from_the_wire() {
    // create (v0) -> update with expected 0 (v1) -> concurrent update with
    // expected 0 is rejected and the first update's result stands.
    let mut store = SqliteStore::open(temp_dir("example_scenario")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Initial task title".to_string(),
            ..Default::default()
        })
        .expect("create");
    assert_eq!(task.version, 0);

    let updated = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(0),
            title: Some("Retitled by the winner".to_string()),
            ..Default::default()
        })
        .expect("winning update");
    assert_eq!(updated.version, 1);

    let err = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(0),
            title: Some("Retitled by the loser".to_string()),
            ..Default::default()
        })
        .expect_err("losing update");
    assert!(matches!(err, StoreError::VersionConflict { .. }));

    let task = store.get_task(task.id).expect("get").expect("exists");
    assert_eq!(task.title, "Retitled by the winner");
    assert_eq!(task.version, 1);
}
