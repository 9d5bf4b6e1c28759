//! One session's detached pipeline

use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::prompt::delegated_query;
use super::stage::PipelineStage;
use crate::config::DelegationSettings;
use crate::error::{SessionError, SessionResult};
use crate::host::HostActions;
use crate::logging::SharedLogger;
use crate::session::SessionStore;
use crate::types::{ChatOpenArgs, Completion};

/// Message recorded when a pipeline is cancelled before it finishes
pub const CANCELLED_MESSAGE: &str = "pipeline cancelled";

/// Message stored in the result of a pipeline that ran every step
pub const STARTED_MESSAGE: &str = "Delegated chat session started";

/// Everything a pipeline task owns
pub(crate) struct Pipeline {
    pub id: String,
    pub prompt: String,
    pub store: Arc<dyn SessionStore>,
    pub host: Arc<dyn HostActions>,
    pub settings: DelegationSettings,
    pub logger: SharedLogger,
    pub cancel: CancellationToken,
    pub stage: watch::Sender<PipelineStage>,
}

impl Pipeline {
    /// Run every step, then record the outcome on the session.
    ///
    /// Never returns an error: failures end up in the record.
    pub async fn run(self) -> PipelineStage {
        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SessionError::Pipeline(CANCELLED_MESSAGE.to_string())),
            outcome = self.steps() => outcome,
        };

        let (final_stage, completion) = match outcome {
            Ok(()) => (
                PipelineStage::Completed,
                Completion::Result(json!({
                    "sessionId": self.id,
                    "message": STARTED_MESSAGE,
                })),
            ),
            Err(e) => {
                let message = match e {
                    SessionError::Pipeline(message) => message,
                    other => other.to_string(),
                };
                crate::log_warn!(self.logger, "Pipeline for session {} failed: {}", self.id, message);
                (PipelineStage::Failed, Completion::Error(message))
            }
        };

        // Record first: joiners wake on the terminal stage and expect the write
        self.record(completion);
        if let Err(e) = self.advance(final_stage) {
            crate::log_error!(self.logger, "Session {}: {}", self.id, e);
        }
        final_stage
    }

    async fn steps(&self) -> SessionResult<()> {
        tokio::time::sleep(self.settings.initial_delay()).await;
        self.execute(&self.settings.new_chat_command, None).await?;
        self.advance(PipelineStage::ChatReset)?;

        tokio::time::sleep(self.settings.submit_delay()).await;
        let args = ChatOpenArgs::new(delegated_query(&self.prompt, &self.id), self.settings.chat_mode);
        let args = serde_json::to_value(args)
            .map_err(|e| SessionError::Pipeline(e.to_string()))?;
        self.execute(&self.settings.open_chat_command, Some(args)).await?;
        self.advance(PipelineStage::PromptSubmitted)
    }

    async fn execute(&self, command: &str, args: Option<serde_json::Value>) -> SessionResult<()> {
        crate::log_debug!(self.logger, "Session {}: executing {}", self.id, command);
        self.host
            .execute_command(command, args)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Pipeline(e.to_string()))
    }

    fn advance(&self, next: PipelineStage) -> SessionResult<()> {
        let current = *self.stage.borrow();
        current.validate_transition(&next)?;
        // send_replace updates even when every receiver is gone
        self.stage.send_replace(next);
        Ok(())
    }

    fn record(&self, completion: Completion) {
        match self
            .settings
            .completion_policy
            .record(self.store.as_ref(), &self.id, completion)
        {
            Ok(true) => {
                crate::log_debug!(self.logger, "Session {}: pipeline outcome recorded", self.id);
            }
            Ok(false) => {
                crate::log_info!(
                    self.logger,
                    "Session {} already finished; pipeline outcome ignored",
                    self.id
                );
            }
            // Store cleared at teardown while the pipeline was finishing
            Err(SessionError::NotFound(_)) => {
                crate::log_warn!(
                    self.logger,
                    "Session {} no longer exists; pipeline outcome dropped",
                    self.id
                );
            }
            Err(e) => {
                crate::log_error!(self.logger, "Session {}: {}", self.id, e);
            }
        }
    }
}
