//! Delegator: owns the session store and every in-flight pipeline

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::runner::Pipeline;
use super::stage::PipelineStage;
use crate::config::{Settings, ShutdownMode};
use crate::error::{SessionError, SessionResult};
use crate::host::HostActions;
use crate::logging::SharedLogger;
use crate::session::SessionStore;
use crate::types::{Completion, SessionRecord};

/// A session record plus the stage of its pipeline while one is running
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub record: SessionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStage>,
}

struct InFlight {
    cancel: CancellationToken,
    /// Taken by shutdown; the entry itself stays until the pipeline ends
    handle: Option<JoinHandle<PipelineStage>>,
    stage: watch::Receiver<PipelineStage>,
}

struct InFlightTable {
    accepting: bool,
    pipelines: HashMap<String, InFlight>,
}

/// Drops a pipeline's table entry when its task ends, even by panic
struct InFlightGuard {
    table: Arc<Mutex<InFlightTable>>,
    id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.table.lock().pipelines.remove(&self.id);
    }
}

/// Starts delegated sessions and supervises their pipelines
///
/// Every pipeline runs as its own tokio task with a child of the
/// delegator's cancellation token. A pipeline removes itself from the
/// in-flight table when it ends; `shutdown` stops new sessions, waits for
/// or cancels the rest, then clears the store.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use copilot_actions_core::config::Settings;
/// # use copilot_actions_core::host::MockHostActions;
/// # use copilot_actions_core::logging::{Logger, NoOpLogger};
/// # use copilot_actions_core::pipeline::Delegator;
/// # use copilot_actions_core::session::MemorySessionStore;
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
/// let delegator = Delegator::new(
///     Arc::new(MemorySessionStore::new()),
///     Arc::new(MockHostActions::new(logger.clone())),
///     Settings::default(),
///     logger,
/// );
///
/// let id = delegator.start_session("Write the changelog")?;
/// delegator.join(&id).await;
/// println!("{:?}", delegator.status(&id)?.record.status);
/// delegator.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct Delegator {
    store: Arc<dyn SessionStore>,
    host: Arc<dyn HostActions>,
    settings: Settings,
    logger: SharedLogger,
    root: CancellationToken,
    in_flight: Arc<Mutex<InFlightTable>>,
}

impl Delegator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        host: Arc<dyn HostActions>,
        settings: Settings,
        logger: SharedLogger,
    ) -> Self {
        Self {
            store,
            host,
            settings,
            logger,
            root: CancellationToken::new(),
            in_flight: Arc::new(Mutex::new(InFlightTable {
                accepting: true,
                pipelines: HashMap::new(),
            })),
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn host(&self) -> &Arc<dyn HostActions> {
        &self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_accepting(&self) -> bool {
        self.in_flight.lock().accepting
    }

    /// Number of pipelines still running
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().pipelines.len()
    }

    /// Create a session and spawn its pipeline without waiting for it.
    ///
    /// Returns the new id as soon as the record exists. Pipeline failures
    /// never come back through here; they are recorded on the session.
    pub fn start_session(&self, prompt: &str) -> SessionResult<String> {
        if prompt.trim().is_empty() {
            return Err(SessionError::InvalidArgument(
                "prompt must not be empty".to_string(),
            ));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SessionError::Pipeline(format!("no async runtime: {}", e)))?;

        // Holding the table lock keeps shutdown from slipping in between the
        // check and the insert, and keeps the task from removing itself first
        let mut table = self.in_flight.lock();
        if !table.accepting {
            return Err(SessionError::ShuttingDown);
        }

        let id = self.store.create();
        let cancel = self.root.child_token();
        let (stage_tx, stage_rx) = watch::channel(PipelineStage::Created);

        let pipeline = Pipeline {
            id: id.clone(),
            prompt: prompt.to_string(),
            store: Arc::clone(&self.store),
            host: Arc::clone(&self.host),
            settings: self.settings.delegation.clone(),
            logger: Arc::clone(&self.logger),
            cancel: cancel.clone(),
            stage: stage_tx,
        };

        let guard = InFlightGuard {
            table: Arc::clone(&self.in_flight),
            id: id.clone(),
        };
        let handle = runtime.spawn(async move {
            let _guard = guard;
            pipeline.run().await
        });

        table.pipelines.insert(
            id.clone(),
            InFlight {
                cancel,
                handle: Some(handle),
                stage: stage_rx,
            },
        );
        crate::log_info!(self.logger, "Session {} started via {}", id, self.host.name());
        Ok(id)
    }

    /// Record an external completion under the configured policy.
    ///
    /// Returns whether the record changed; `false` only happens under
    /// first-write-wins when the session had already finished.
    pub fn complete(
        &self,
        id: &str,
        result: Option<Value>,
        error: Option<String>,
    ) -> SessionResult<bool> {
        self.store.status(id)?;
        let completion = Completion::from_parts(result, error)?;
        let applied = self
            .settings
            .delegation
            .completion_policy
            .record(self.store.as_ref(), id, completion)?;
        crate::log_debug!(self.logger, "Session {} completed externally (applied: {})", id, applied);
        Ok(applied)
    }

    /// Record snapshot plus the pipeline stage, if the pipeline is running
    pub fn status(&self, id: &str) -> SessionResult<SessionView> {
        let record = self.store.status(id)?;
        Ok(SessionView {
            record,
            stage: self.stage(id),
        })
    }

    /// Stage of a running pipeline
    pub fn stage(&self, id: &str) -> Option<PipelineStage> {
        self.in_flight
            .lock()
            .pipelines
            .get(id)
            .map(|f| *f.stage.borrow())
    }

    /// Cancel one session's pipeline.
    ///
    /// The pipeline records `pipeline cancelled` and issues no further host
    /// actions. Returns whether a pipeline was still running.
    pub fn cancel(&self, id: &str) -> SessionResult<bool> {
        self.store.status(id)?;
        match self.in_flight.lock().pipelines.get(id) {
            Some(f) => {
                f.cancel.cancel();
                crate::log_info!(self.logger, "Session {}: pipeline cancel requested", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Wait until a session's pipeline has recorded its outcome.
    ///
    /// Returns the final stage, or `None` when no pipeline is running.
    pub async fn join(&self, id: &str) -> Option<PipelineStage> {
        let mut stage = self
            .in_flight
            .lock()
            .pipelines
            .get(id)
            .map(|f| f.stage.clone())?;

        if stage.wait_for(|s| s.is_terminal()).await.is_err() {
            crate::log_warn!(self.logger, "Session {}: pipeline ended without a final stage", id);
        }
        let result = *stage.borrow();
        Some(result)
    }

    /// Shut down with the configured mode and drain timeout
    pub async fn shutdown(&self) {
        let shutdown = &self.settings.shutdown;
        self.shutdown_with(shutdown.mode, shutdown.drain_timeout())
            .await;
    }

    /// Stop accepting sessions, drain or cancel running pipelines, await
    /// them all, then clear the store
    pub async fn shutdown_with(&self, mode: ShutdownMode, drain_timeout: Duration) {
        // Entries stay so running sessions can still be cancelled and
        // report their stage while draining
        let handles: Vec<(String, JoinHandle<PipelineStage>)> = {
            let mut table = self.in_flight.lock();
            table.accepting = false;
            table
                .pipelines
                .iter_mut()
                .filter_map(|(id, f)| f.handle.take().map(|h| (id.clone(), h)))
                .collect()
        };
        crate::log_info!(
            self.logger,
            "Shutting down ({:?}) with {} pipeline(s) in flight",
            mode,
            handles.len()
        );

        let stragglers = match mode {
            ShutdownMode::Cancel => handles,
            ShutdownMode::Drain => {
                let deadline = tokio::time::Instant::now() + drain_timeout;
                let mut stragglers = Vec::new();
                for (id, mut handle) in handles {
                    match tokio::time::timeout_at(deadline, &mut handle).await {
                        Ok(joined) => self.log_joined(&id, joined),
                        Err(_) => stragglers.push((id, handle)),
                    }
                }
                if !stragglers.is_empty() {
                    crate::log_warn!(
                        self.logger,
                        "Drain timeout elapsed; cancelling {} pipeline(s)",
                        stragglers.len()
                    );
                }
                stragglers
            }
        };

        self.root.cancel();
        for (id, handle) in stragglers {
            let joined = handle.await;
            self.log_joined(&id, joined);
        }

        self.store.clear();
        crate::log_info!(self.logger, "Shutdown complete");
    }

    fn log_joined(&self, id: &str, joined: Result<PipelineStage, tokio::task::JoinError>) {
        match joined {
            Ok(stage) => crate::log_debug!(self.logger, "Session {}: pipeline ended {}", id, stage),
            Err(e) => crate::log_error!(self.logger, "Session {}: pipeline task failed: {}", id, e),
        }
    }
}

impl Drop for Delegator {
    fn drop(&mut self) {
        // Pipelines must not outlive their delegator
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelegationSettings;
    use crate::host::{MockHostActions, MockMode, NEW_CHAT_COMMAND, OPEN_CHAT_COMMAND};
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};
    use crate::session::{CompletionPolicy, MemorySessionStore};
    use crate::types::{ChatMode, SessionStatus};
    use serde_json::json;

    fn logger() -> SharedLogger {
        Arc::new(NoOpLogger::new())
    }

    fn delegator_with(host: Arc<MockHostActions>, settings: Settings) -> Delegator {
        Delegator::new(Arc::new(MemorySessionStore::new()), host, settings, logger())
    }

    fn delegator(host: Arc<MockHostActions>) -> Delegator {
        delegator_with(host, Settings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_returns_pending_id_immediately() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host.clone());

        let id = d.start_session("Write the docs").unwrap();
        let view = d.status(&id).unwrap();

        assert_eq!(view.record.status, SessionStatus::Pending);
        assert!(view.record.result.is_none());
        assert_eq!(view.stage, Some(PipelineStage::Created));
        assert!(host.commands().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_pipeline_issues_both_commands() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host.clone());

        let start = tokio::time::Instant::now();
        let id = d.start_session("Write the docs").unwrap();
        assert_eq!(d.join(&id).await, Some(PipelineStage::Completed));

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(
            host.commands(),
            vec![NEW_CHAT_COMMAND.to_string(), OPEN_CHAT_COMMAND.to_string()]
        );

        let open_args = host.issued()[1].args.clone().unwrap();
        assert_eq!(open_args["mode"], "agent");
        let query = open_args["query"].as_str().unwrap();
        assert!(query.starts_with("Write the docs"));
        assert!(query.contains(&id));

        let view = d.status(&id).unwrap();
        assert_eq!(view.record.status, SessionStatus::Completed);
        assert_eq!(
            view.record.result,
            Some(json!({"sessionId": id, "message": "Delegated chat session started"}))
        );
        assert_eq!(view.stage, None);
        assert_eq!(d.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_advances_with_timers() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host);
        let id = d.start_session("task").unwrap();

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(d.stage(&id), Some(PipelineStage::ChatReset));
        assert_eq!(d.status(&id).unwrap().record.status, SessionStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_host_action_failure_is_recorded() {
        let host = Arc::new(MockHostActions::new(logger()).failing_on(NEW_CHAT_COMMAND, "boom"));
        let d = delegator(host.clone());

        let id = d.start_session("task").unwrap();
        assert_eq!(d.join(&id).await, Some(PipelineStage::Failed));

        let record = d.status(&id).unwrap().record;
        assert_eq!(record.status, SessionStatus::Error);
        assert!(record.error.unwrap().contains("boom"));
        assert!(record.result.is_none());
        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pipeline_overwrites_early_external_completion() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host);

        let id = d.start_session("task").unwrap();
        assert!(d.complete(&id, Some(json!({"summary": "done"})), None).unwrap());

        let early = d.status(&id).unwrap().record;
        assert_eq!(early.status, SessionStatus::Completed);
        assert_eq!(early.result, Some(json!({"summary": "done"})));

        d.join(&id).await;
        let last = d.status(&id).unwrap().record;
        assert_eq!(last.status, SessionStatus::Completed);
        assert_eq!(
            last.result,
            Some(json!({"sessionId": id, "message": "Delegated chat session started"}))
        );
        assert_eq!(last.revision, 2);
        assert_eq!(last.start_time, early.start_time);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_write_wins_keeps_external_completion() {
        let host = Arc::new(MockHostActions::new(logger()));
        let memory = Arc::new(MemoryLogger::new());
        let mut settings = Settings::default();
        settings.delegation.completion_policy = CompletionPolicy::FirstWriteWins;
        let d = Delegator::new(
            Arc::new(MemorySessionStore::new()),
            host,
            settings,
            memory.clone(),
        );

        let id = d.start_session("task").unwrap();
        assert!(d.complete(&id, None, Some("gave up".to_string())).unwrap());
        d.join(&id).await;

        let record = d.status(&id).unwrap().record;
        assert_eq!(record.status, SessionStatus::Error);
        assert_eq!(record.error.as_deref(), Some("gave up"));
        assert_eq!(record.revision, 1);
        assert!(memory.contains(LogLevel::Info, "pipeline outcome ignored"));
        assert!(!d.complete(&id, Some(json!("late")), None).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_validation() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host);
        let id = d.start_session("task").unwrap();

        assert_eq!(
            d.complete("missing", Some(json!(1)), None).unwrap_err(),
            SessionError::NotFound("missing".to_string())
        );
        assert!(matches!(
            d.complete(&id, None, None),
            Err(SessionError::InvalidArgument(_))
        ));
        assert_eq!(d.status(&id).unwrap().record.revision, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_prompt_creates_nothing() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host);

        assert!(matches!(
            d.start_session("   "),
            Err(SessionError::InvalidArgument(_))
        ));
        assert!(d.store().is_empty());
        assert_eq!(d.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_further_host_actions() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host.clone());
        let id = d.start_session("task").unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(d.cancel(&id).unwrap());
        assert_eq!(d.join(&id).await, Some(PipelineStage::Failed));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);

        let record = d.status(&id).unwrap().record;
        assert_eq!(record.status, SessionStatus::Error);
        assert_eq!(record.error.as_deref(), Some("pipeline cancelled"));
        assert!(!d.cancel(&id).unwrap());
        assert!(d.cancel("missing").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_hanging_host_action() {
        let host = Arc::new(MockHostActions::new(logger()).hanging_on(OPEN_CHAT_COMMAND));
        let d = delegator(host);
        let id = d.start_session("task").unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(d.stage(&id), Some(PipelineStage::ChatReset));

        d.cancel(&id).unwrap();
        assert_eq!(d.join(&id).await, Some(PipelineStage::Failed));
        assert_eq!(
            d.status(&id).unwrap().record.error.as_deref(),
            Some("pipeline cancelled")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_pipeline_does_not_block_others() {
        let host = Arc::new(
            MockHostActions::new(logger())
                .with_default_mode(MockMode::Hang)
                .with_mode(NEW_CHAT_COMMAND, MockMode::Succeed(Value::Null)),
        );
        let d = delegator(host.clone());
        let stuck = d.start_session("first").unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(d.stage(&stuck), Some(PipelineStage::ChatReset));

        let second = d.start_session("second").unwrap();
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(d.stage(&second), Some(PipelineStage::ChatReset));
        assert_eq!(d.in_flight(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_commands_and_mode() {
        let mut settings = Settings::default();
        settings.delegation = DelegationSettings {
            open_chat_command: "custom.open".to_string(),
            chat_mode: ChatMode::Edit,
            ..DelegationSettings::default()
        };
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator_with(host.clone(), settings);
        let id = d.start_session("task").unwrap();

        assert_eq!(d.join(&id).await, Some(PipelineStage::Completed));
        assert_eq!(host.issued()[1].command, "custom.open");
        assert_eq!(host.issued()[1].args.as_ref().unwrap()["mode"], "edit");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancel_rejects_new_sessions() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host.clone());
        d.start_session("a").unwrap();
        d.start_session("b").unwrap();

        d.shutdown_with(ShutdownMode::Cancel, Duration::from_secs(5)).await;

        assert!(!d.is_accepting());
        assert_eq!(d.start_session("c").unwrap_err(), SessionError::ShuttingDown);
        assert!(d.store().is_empty());
        assert_eq!(d.in_flight(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(host.commands().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drain_lets_pipelines_finish() {
        let host = Arc::new(MockHostActions::new(logger()));
        let d = delegator(host.clone());
        d.start_session("a").unwrap();
        d.start_session("b").unwrap();

        d.shutdown().await;

        assert_eq!(host.commands().len(), 4);
        assert!(d.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drain_timeout_cancels_stragglers() {
        let host = Arc::new(MockHostActions::new(logger()).hanging_on(NEW_CHAT_COMMAND));
        let d = delegator(host);
        d.start_session("a").unwrap();

        let start = tokio::time::Instant::now();
        d.shutdown_with(ShutdownMode::Drain, Duration::from_secs(2)).await;

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(d.in_flight(), 0);
        assert!(d.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_stays_reachable_while_draining() {
        let host = Arc::new(MockHostActions::new(logger()).hanging_on(NEW_CHAT_COMMAND));
        let d = Arc::new(delegator(host.clone()));
        let id = d.start_session("task").unwrap();

        let start = tokio::time::Instant::now();
        let draining = tokio::spawn({
            let d = Arc::clone(&d);
            async move {
                d.shutdown_with(ShutdownMode::Drain, Duration::from_secs(60))
                    .await
            }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!d.is_accepting());
        assert_eq!(d.in_flight(), 1);
        assert_eq!(d.stage(&id), Some(PipelineStage::Created));
        let view = d.status(&id).unwrap();
        assert_eq!(view.record.status, SessionStatus::Pending);
        assert_eq!(view.stage, Some(PipelineStage::Created));

        assert!(d.cancel(&id).unwrap());
        draining.await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(60));
        assert_eq!(d.in_flight(), 0);
        assert!(d.store().is_empty());
        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_host_does_not_leave_stale_pipeline() {
        struct PanickingHost;

        #[async_trait::async_trait]
        impl HostActions for PanickingHost {
            fn name(&self) -> &str {
                "panicking"
            }

            async fn execute_command(
                &self,
                command: &str,
                _args: Option<Value>,
            ) -> crate::error::HostResult<Value> {
                panic!("host blew up on {}", command);
            }
        }

        let d = Delegator::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(PanickingHost),
            Settings::default(),
            logger(),
        );
        let id = d.start_session("task").unwrap();

        assert_eq!(d.join(&id).await, Some(PipelineStage::Created));
        assert_eq!(d.in_flight(), 0);
        assert_eq!(d.stage(&id), None);
        assert_eq!(d.status(&id).unwrap().record.status, SessionStatus::Pending);

        d.shutdown_with(ShutdownMode::Drain, Duration::from_secs(1)).await;
        assert!(d.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_delegator_cancels_pipelines() {
        let host = Arc::new(MockHostActions::new(logger()));
        let store = Arc::new(MemorySessionStore::new());
        let d = Delegator::new(store.clone(), host.clone(), Settings::default(), logger());
        let id = d.start_session("task").unwrap();

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);

        drop(d);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);
        let record = store.status(&id).unwrap();
        assert_eq!(record.status, SessionStatus::Error);
        assert_eq!(record.error.as_deref(), Some("pipeline cancelled"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_latency_adds_to_pipeline_time() {
        let host = Arc::new(MockHostActions::new(logger()).with_delay(250));
        let d = delegator(host.clone());

        let start = tokio::time::Instant::now();
        let id = d.start_session("task").unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(d.stage(&id), Some(PipelineStage::Created));
        assert_eq!(host.commands(), vec![NEW_CHAT_COMMAND.to_string()]);

        assert_eq!(d.join(&id).await, Some(PipelineStage::Completed));
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_store_only_logs_warning() {
        let host = Arc::new(MockHostActions::new(logger()));
        let memory = Arc::new(MemoryLogger::new());
        let d = Delegator::new(
            Arc::new(MemorySessionStore::new()),
            host,
            Settings::default(),
            memory.clone(),
        );

        let id = d.start_session("task").unwrap();
        d.store().clear();
        assert_eq!(d.join(&id).await, Some(PipelineStage::Completed));

        assert!(memory.contains(LogLevel::Warn, "no longer exists"));
        assert!(d.status(&id).is_err());
    }
}
