//! In-memory session store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::SessionStore;
use crate::error::{SessionError, SessionResult};
use crate::types::{Completion, SessionRecord};

/// In-memory session store
///
/// Records live for the lifetime of the store. Every operation takes the
/// lock for a single read or mutation and never holds it across an await
/// point, so two writes to the same id never interleave; which of two racing
/// completions lands last is still up to the scheduler.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a record as-is (useful for seeding tests)
    pub fn insert(&self, record: SessionRecord) {
        self.records.write().insert(record.id.clone(), record);
    }
}

impl SessionStore for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn create(&self) -> String {
        let mut records = self.records.write();
        // uuid v4 collisions are not expected, but ids must never be reused
        let mut record = SessionRecord::new();
        while records.contains_key(&record.id) {
            record = SessionRecord::new();
        }
        let id = record.id.clone();
        records.insert(id.clone(), record);
        id
    }

    fn complete_with(&self, id: &str, completion: Completion) -> SessionResult<SessionRecord> {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        record.apply(completion);
        Ok(record.clone())
    }

    fn complete_with_if_pending(&self, id: &str, completion: Completion) -> SessionResult<bool> {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        if !record.is_pending() {
            return Ok(false);
        }
        record.apply(completion);
        Ok(true)
    }

    fn status(&self, id: &str) -> SessionResult<SessionRecord> {
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn clear(&self) {
        self.records.write().clear();
    }

    fn list(&self) -> Vec<SessionRecord> {
        let mut records: Vec<SessionRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        records
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;
    use serde_json::json;

    #[test]
    fn test_memory_store_name() {
        assert_eq!(MemorySessionStore::new().name(), "memory");
    }

    #[test]
    fn test_status_after_create_is_pending() {
        let store = MemorySessionStore::new();
        let id = store.create();

        let record = store.status(&id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.status, SessionStatus::Pending);
        assert!(record.result.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_complete_with_result() {
        let store = MemorySessionStore::new();
        let id = store.create();

        store.complete(&id, Some(json!("x")), None).unwrap();

        let record = store.status(&id).unwrap();
        assert_eq!(record.status, SessionStatus::Completed);
        assert_eq!(record.result, Some(json!("x")));
        assert!(record.error.is_none());
    }

    #[test]
    fn test_complete_with_error() {
        let store = MemorySessionStore::new();
        let id = store.create();

        store.complete(&id, None, Some("boom".to_string())).unwrap();

        let record = store.status(&id).unwrap();
        assert_eq!(record.status, SessionStatus::Error);
        assert_eq!(record.error.as_deref(), Some("boom"));
        assert!(record.result.is_none());
    }

    #[test]
    fn test_complete_without_payload_is_rejected_and_record_unchanged() {
        let store = MemorySessionStore::new();
        let id = store.create();
        let before = store.status(&id).unwrap();

        let err = store.complete(&id, None, None).unwrap_err();
        assert!(matches!(err, SessionError::InvalidArgument(_)));
        assert_eq!(store.status(&id).unwrap(), before);
    }

    #[test]
    fn test_complete_unknown_id() {
        let store = MemorySessionStore::new();
        let err = store.complete("nope", Some(json!(1)), None).unwrap_err();
        assert_eq!(err, SessionError::NotFound("nope".to_string()));

        // Unknown id wins over a missing payload
        let err = store.complete("nope", None, None).unwrap_err();
        assert_eq!(err, SessionError::NotFound("nope".to_string()));
    }

    #[test]
    fn test_status_unknown_id() {
        let store = MemorySessionStore::new();
        assert!(matches!(store.status("nope"), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemorySessionStore::new();
        let id = store.create();
        let started = store.status(&id).unwrap().start_time;

        store.complete(&id, Some(json!({"summary": "done"})), None).unwrap();
        store.complete(&id, None, Some("late failure".to_string())).unwrap();

        let record = store.status(&id).unwrap();
        assert_eq!(record.status, SessionStatus::Error);
        assert_eq!(record.error.as_deref(), Some("late failure"));
        assert!(record.result.is_none());
        assert_eq!(record.revision, 2);
        assert_eq!(record.start_time, started);
    }

    #[test]
    fn test_complete_if_pending_keeps_first_write() {
        let store = MemorySessionStore::new();
        let id = store.create();

        assert!(store.complete_if_pending(&id, Some(json!("first")), None).unwrap());
        assert!(!store.complete_if_pending(&id, Some(json!("second")), None).unwrap());

        let record = store.status(&id).unwrap();
        assert_eq!(record.result, Some(json!("first")));
        assert_eq!(record.revision, 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemorySessionStore::new();
        let a = store.create();
        let b = store.create();
        assert_eq!(store.len(), 2);

        store.clear();

        assert!(store.is_empty());
        assert!(matches!(store.status(&a), Err(SessionError::NotFound(_))));
        assert!(matches!(store.status(&b), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_list_is_ordered_by_start_time() {
        let store = MemorySessionStore::new();
        let mut older = SessionRecord::with_id("older");
        older.start_time = older.start_time - chrono::Duration::seconds(10);
        store.insert(SessionRecord::with_id("newer"));
        store.insert(older);

        let ids: Vec<String> = store.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["older".to_string(), "newer".to_string()]);
    }

    #[test]
    fn test_memory_store_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemorySessionStore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let id = store_clone.create();
                store_clone.complete(&id, Some(json!(i)), None).unwrap();
                assert_eq!(store_clone.status(&id).unwrap().result, Some(json!(i)));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
    }
}
