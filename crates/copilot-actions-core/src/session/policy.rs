//! Completion policy for racing writers
//!
//! A session has up to three writers: its pipeline's success path, its
//! pipeline's failure path, and an external completion call. The policy
//! decides what happens when a record is completed more than once.

use serde::{Deserialize, Serialize};

use super::traits::SessionStore;
use crate::error::SessionResult;
use crate::types::Completion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Every completion overwrites the record
    LastWriteWins,
    /// Only the first completion of a pending record is kept
    FirstWriteWins,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        CompletionPolicy::LastWriteWins
    }
}

impl CompletionPolicy {
    /// Write a completion according to this policy.
    ///
    /// Returns whether the store was changed.
    pub fn record(
        &self,
        store: &dyn SessionStore,
        id: &str,
        completion: Completion,
    ) -> SessionResult<bool> {
        match self {
            CompletionPolicy::LastWriteWins => store.complete_with(id, completion).map(|_| true),
            CompletionPolicy::FirstWriteWins => store.complete_with_if_pending(id, completion),
        }
    }
}
