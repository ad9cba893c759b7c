#![forbid(unsafe_code)]

use std::path::PathBuf;
use tv_storage::{SqliteStore, StoreError, TaskCreateRequest, TaskEditRequest};

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

fn field_names(err: StoreError) -> Vec<&'static str> {
    match err {
        StoreError::Validation(errors) => errors.iter().map(|error| error.field).collect(),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn short_title_is_rejected() {
    let mut store = SqliteStore::open(temp_dir("short_title")).expect("open store");
    let err = store
        .create_task(TaskCreateRequest {
            title: "Hi".to_string(),
            ..Default::default()
        })
        .expect_err("short title");
    assert_eq!(field_names(err), vec!["title"]);
}

#[test]
fn invalid_enums_collect_per_field_errors() {
    let mut store = SqliteStore::open(temp_dir("bad_enums")).expect("open store");
    let err = store
        .create_task(TaskCreateRequest {
            title: "Label the server racks".to_string(),
            status: Some("done".to_string()),
            priority: Some("urgent".to_string()),
            ..Default::default()
        })
        .expect_err("bad enums");
    let mut fields = field_names(err);
    fields.sort_unstable();
    assert_eq!(fields, vec!["priority", "status"]);
}

#[test]
fn past_due_date_rejected_while_active_but_fine_when_completed() {
    let mut store = SqliteStore::open(temp_dir("past_due")).expect("open store");

    let err = store
        .create_task(TaskCreateRequest {
            title: "Backfill the metrics table".to_string(),
            due_date: Some("2020-01-01".to_string()),
            ..Default::default()
        })
        .expect_err("past date while pending");
    assert_eq!(field_names(err), vec!["due_date"]);

    // The same date is accepted once the work is already done.
    let task = store
        .create_task(TaskCreateRequest {
            title: "Backfill the metrics table".to_string(),
            status: Some("completed".to_string()),
            due_date: Some("2020-01-01".to_string()),
            ..Default::default()
        })
        .expect("completed task with past date");
    assert_eq!(task.due_date.as_deref(), Some("2020-01-01"));
}

#[test]
fn malformed_due_date_and_metadata_are_rejected() {
    let mut store = SqliteStore::open(temp_dir("malformed_inputs")).expect("open store");
    let err = store
        .create_task(TaskCreateRequest {
            title: "Validate the import format".to_string(),
            due_date: Some("01/06/2031".to_string()),
            metadata: Some("{not json".to_string()),
            ..Default::default()
        })
        .expect_err("malformed inputs");
    let mut fields = field_names(err);
    fields.sort_unstable();
    assert_eq!(fields, vec!["due_date", "metadata"]);
}

#[test]
fn metadata_is_stored_in_canonical_form() {
    let mut store = SqliteStore::open(temp_dir("metadata_canonical")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Record the deploy settings".to_string(),
            metadata: Some("{ \"env\" : \"prod\" }".to_string()),
            ..Default::default()
        })
        .expect("create");
    assert_eq!(task.metadata.as_deref(), Some("{\"env\":\"prod\"}"));
}

#[test]
fn unknown_assignee_is_a_field_error() {
    let mut store = SqliteStore::open(temp_dir("unknown_assignee")).expect("open store");
    let err = store
        .create_task(TaskCreateRequest {
            title: "Hand off the on-call shift".to_string(),
            assigned_to: Some(9001),
            ..Default::default()
        })
        .expect_err("unknown assignee");
    assert_eq!(field_names(err), vec!["assigned_to"]);
}

#[test]
fn failed_edit_leaves_row_and_audit_untouched() {
    let mut store = SqliteStore::open(temp_dir("failed_edit")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Stage the rollout plan".to_string(),
            ..Default::default()
        })
        .expect("create");

    let err = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(0),
            title: Some("x".to_string()),
            ..Default::default()
        })
        .expect_err("invalid edit");
    assert_eq!(field_names(err), vec!["title"]);

    let row = store.get_task(task.id).expect("get").expect("row");
    assert_eq!(row.version, 0);
    assert_eq!(row.title, "Stage the rollout plan");
    assert_eq!(store.task_logs(task.id).expect("logs").len(), 1);
}

#[test]
fn empty_edit_is_refused_up_front() {
    let mut store = SqliteStore::open(temp_dir("empty_edit")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Mirror the artifact repo".to_string(),
            ..Default::default()
        })
        .expect("create");

    let err = store
        .edit_task(TaskEditRequest {
            id: task.id,
            ..Default::default()
        })
        .expect_err("nothing to do");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[test]
fn edit_validates_the_merged_state() {
    let mut store = SqliteStore::open(temp_dir("merged_state")).expect("open store");
    let task = store
        .create_task(TaskCreateRequest {
            title: "Schedule the capacity review".to_string(),
            due_date: Some("2031-03-01".to_string()),
            status: Some("completed".to_string()),
            ..Default::default()
        })
        .expect("create");

    // Moving the date into the past is fine while completed...
    let task = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(0),
            due_date: Some(Some("2020-03-01".to_string())),
            ..Default::default()
        })
        .expect("edit while completed");

    // ...but flipping back to pending with that stored past date is not.
    let err = store
        .edit_task(TaskEditRequest {
            id: task.id,
            expected_version: Some(task.version),
            status: Some("pending".to_string()),
            ..Default::default()
        })
        .expect_err("past date resurfaces");
    assert_eq!(field_names(err), vec!["due_date"]);
}
