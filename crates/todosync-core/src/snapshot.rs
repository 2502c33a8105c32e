//! JSON snapshot of the whole task collection, as stored in the persistence slot.

use std::collections::HashSet;

use thiserror::Error;

use crate::id::TaskId;
use crate::task::{SchemaError, Task};

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not a JSON array of task records.
    #[error("failed to parse snapshot: {0}")]
    Parse(#[source] serde_json::Error),
    /// The collection could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
    /// A record violates the task schema.
    #[error("invalid task record: {0}")]
    Schema(#[from] SchemaError),
    /// Two records share an identifier.
    #[error("duplicate task id {0} in snapshot")]
    DuplicateId(TaskId),
}

/// Serialize the collection into the slot format.
///
/// # Errors
/// Returns [`SnapshotError::Serialize`] if JSON encoding fails.
pub fn encode(tasks: &[Task]) -> Result<String, SnapshotError> {
    serde_json::to_string(tasks).map_err(SnapshotError::Serialize)
}

/// Parse and validate a snapshot.
///
/// Every record is checked against the task schema and ids must be unique.
///
/// # Errors
/// Returns [`SnapshotError`] when the payload is malformed or violates the schema.
pub fn decode(raw: &str) -> Result<Vec<Task>, SnapshotError> {
    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
    validate_collection(&tasks)?;
    Ok(tasks)
}

/// Validate each record and the uniqueness of ids.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_collection(tasks: &[Task]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id) {
            return Err(SnapshotError::DuplicateId(task.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::datetime};

    #[test]
    fn encode_then_decode_preserves_records() {
        let created = datetime!(2024-03-01 10:00 UTC);
        let mut done = Task::new("Write report", created);
        done.mark_completed(created + Duration::hours(1));
        let mut gone = Task::new("Buy milk", created);
        gone.mark_deleted(created + Duration::hours(2));
        let tasks = vec![Task::new("Clean house", created), done, gone];

        let raw = encode(&tasks).unwrap_or_else(|err| panic!("encode: {err}"));
        let decoded = decode(&raw).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn decode_accepts_null_markers_and_offsets() {
        let raw = r#"[{
            "id": "018e0f6a-7c1e-7d3a-9a63-3f0f2c9d1a10",
            "title": "Buy milk",
            "createdAt": "2024-03-01T07:00:00-03:00",
            "completedAt": null,
            "deletedAt": null,
            "completed": false
        }]"#;
        let tasks = decode(raw).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].created_at, datetime!(2024-03-01 10:00 UTC));
        assert!(tasks[0].is_active());
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        assert!(matches!(decode("{not json"), Err(SnapshotError::Parse(_))));
        assert!(matches!(decode(r#"{"id": 1}"#), Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn decode_rejects_schema_violations() {
        let raw = r#"[{
            "id": "018e0f6a-7c1e-7d3a-9a63-3f0f2c9d1a10",
            "title": "",
            "createdAt": "2024-03-01T10:00:00Z",
            "completed": false
        }]"#;
        assert!(matches!(
            decode(raw),
            Err(SnapshotError::Schema(SchemaError::EmptyTitle(_)))
        ));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let task = Task::new("twice", datetime!(2024-03-01 10:00 UTC));
        let raw = encode(&[task.clone(), task.clone()]).unwrap_or_else(|err| panic!("encode: {err}"));
        assert!(matches!(decode(&raw), Err(SnapshotError::DuplicateId(id)) if id == task.id));
    }
}
