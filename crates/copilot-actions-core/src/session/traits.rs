//! Session store trait

use serde_json::Value;

use crate::error::SessionResult;
use crate::types::{Completion, SessionRecord};

/// Registry of session lifecycles keyed by generated ids
///
/// Owned by whoever needs it and passed around as `Arc<dyn SessionStore>`;
/// there is no process-wide instance.
///
/// Implementations:
/// - `MemorySessionStore`: in-process map, discarded at teardown
///
/// # Example
///
/// ```
/// use copilot_actions_core::session::{SessionStore, MemorySessionStore};
/// use copilot_actions_core::SessionStatus;
/// use serde_json::json;
///
/// let store = MemorySessionStore::new();
/// let id = store.create();
/// assert_eq!(store.status(&id).unwrap().status, SessionStatus::Pending);
///
/// store.complete(&id, Some(json!("x")), None).unwrap();
/// assert_eq!(store.status(&id).unwrap().status, SessionStatus::Completed);
/// ```
pub trait SessionStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Insert a new pending record and return its id.
    ///
    /// The id is readable through `status` as soon as this returns.
    fn create(&self) -> String;

    /// Apply a completion unconditionally (last write wins).
    ///
    /// Fails with `NotFound` for unknown ids.
    fn complete_with(&self, id: &str, completion: Completion) -> SessionResult<SessionRecord>;

    /// Apply a completion only if the record is still pending.
    ///
    /// Returns whether the completion was applied.
    fn complete_with_if_pending(&self, id: &str, completion: Completion) -> SessionResult<bool>;

    /// Snapshot of a record. Fails with `NotFound` for unknown ids.
    fn status(&self, id: &str) -> SessionResult<SessionRecord>;

    /// Remove every record
    fn clear(&self);

    /// Snapshot of every record
    fn list(&self) -> Vec<SessionRecord>;

    /// Record a completion from the optional fields callers send.
    ///
    /// Unknown ids fail with `NotFound`; neither or both fields fail with
    /// `InvalidArgument` and leave the record unchanged.
    fn complete(
        &self,
        id: &str,
        result: Option<Value>,
        error: Option<String>,
    ) -> SessionResult<SessionRecord> {
        self.status(id)?;
        let completion = Completion::from_parts(result, error)?;
        self.complete_with(id, completion)
    }

    /// Like `complete`, but only while the record is still pending
    fn complete_if_pending(
        &self,
        id: &str,
        result: Option<Value>,
        error: Option<String>,
    ) -> SessionResult<bool> {
        self.status(id)?;
        let completion = Completion::from_parts(result, error)?;
        self.complete_with_if_pending(id, completion)
    }

    /// Number of records
    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
