//! Text handed to the delegated chat and back to the delegating agent

use crate::tools::{COMPLETE_SESSION_TOOL, SESSION_STATUS_TOOL};

/// Query submitted to the new chat: the delegated prompt followed by
/// instructions for reporting back under `session_id`
pub fn delegated_query(prompt: &str, session_id: &str) -> String {
    format!(
        "{prompt}\n\n\
         ---\n\
         This task was delegated to you as session {session_id}. When you are done, \
         call the {complete} tool with sessionId \"{session_id}\" and either a \
         `result` describing what you did or an `error` explaining why you could not finish.",
        prompt = prompt.trim(),
        session_id = session_id,
        complete = COMPLETE_SESSION_TOOL,
    )
}

/// Instructions returned to the agent that started the session
pub fn caller_instructions(session_id: &str) -> String {
    format!(
        "A new chat session was started for the delegated task (session {session_id}). \
         Use {status} with sessionId \"{session_id}\" to check on it. The delegated agent \
         reports completion through {complete}; you can also call it yourself to mark \
         the session as completed or failed.",
        session_id = session_id,
        status = SESSION_STATUS_TOOL,
        complete = COMPLETE_SESSION_TOOL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegated_query_mentions_session() {
        let query = delegated_query("  Refactor the parser  ", "abc-123");
        assert!(query.starts_with("Refactor the parser\n"));
        assert!(query.contains("session abc-123"));
        assert!(query.contains(COMPLETE_SESSION_TOOL));
    }

    #[test]
    fn test_caller_instructions() {
        let text = caller_instructions("abc-123");
        assert!(text.contains("abc-123"));
        assert!(text.contains(SESSION_STATUS_TOOL));
        assert!(text.contains(COMPLETE_SESSION_TOOL));
    }
}
