//! Dev session runner
//!
//! Owns the coordinator and a single event channel. File watcher, signal
//! handler and deploy worker all talk to the session through that channel, so
//! coordinator state is only ever touched from the thread running
//! [`DevSession::run`].

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::application::poller::Deployer;
use crate::domain::entities::{
    CredentialMap, DeploymentOutcome, ExecutionTarget, InstanceDescriptor,
};
use crate::domain::ports::{InstanceSource, LogStream};
use crate::error::{StagehandError, StagehandResult};

use super::coordinator::{CloseReport, Command, Coordinator, DeployReason, Trigger};
use super::event::DevEvent;

enum Message {
    Ready,
    Changed(PathBuf),
    Shutdown,
    Finished {
        reloaded: Option<InstanceDescriptor>,
        outcome: DeploymentOutcome,
    },
}

/// Cloneable handle for feeding external events into a running session
#[derive(Clone)]
pub struct SessionHandle {
    tx: Sender<Message>,
}

impl SessionHandle {
    pub fn ready(&self) {
        let _ = self.tx.send(Message::Ready);
    }

    pub fn changed(&self, path: PathBuf) {
        let _ = self.tx.send(Message::Changed(path));
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(Message::Shutdown);
    }
}

pub struct DevSession {
    deployer: Arc<dyn Deployer>,
    source: Arc<dyn InstanceSource>,
    log_stream: Arc<dyn LogStream>,
    credentials: Arc<CredentialMap>,
    current: InstanceDescriptor,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl DevSession {
    /// `initial` is deployed as-is on ready; change-driven deploys reload
    /// from `source`.
    pub fn new(
        initial: InstanceDescriptor,
        credentials: CredentialMap,
        deployer: Arc<dyn Deployer>,
        source: Arc<dyn InstanceSource>,
        log_stream: Arc<dyn LogStream>,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            deployer,
            source,
            log_stream,
            credentials: Arc::new(credentials),
            current: initial,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run until the coordinator closes the session (blocking).
    pub fn run<F>(mut self, on_event: F) -> StagehandResult<CloseReport>
    where
        F: Fn(DevEvent),
    {
        let mut coordinator = Coordinator::new();

        loop {
            let message = self.rx.recv().map_err(|_| StagehandError::ChannelClosed)?;
            let trigger = match message {
                Message::Ready => Trigger::Ready,
                Message::Changed(path) => {
                    if coordinator.accepts_changes() {
                        on_event(DevEvent::FileChanged {
                            path: path.display().to_string(),
                        });
                    }
                    Trigger::Changed(path)
                }
                Message::Shutdown => Trigger::Shutdown,
                Message::Finished { reloaded, outcome } => {
                    if let Some(instance) = reloaded {
                        self.current = instance;
                    }
                    Trigger::DeployFinished(outcome)
                }
            };

            for command in coordinator.handle(trigger) {
                match command {
                    Command::Status(label) => on_event(DevEvent::Status {
                        label: label.to_string(),
                    }),
                    Command::Deploy(reason) => {
                        on_event(DevEvent::DeployStarted { reason });
                        self.spawn_deploy(reason)?;
                    }
                    Command::Present { outcome, live } => self.present(outcome, live, &on_event),
                    Command::Unrecognized { outcome } => on_event(DevEvent::UnknownStatus {
                        instance: outcome.instance_name,
                        status: outcome.status.to_string(),
                    }),
                    Command::Close(report) => {
                        on_event(DevEvent::Closed {
                            status: report.status,
                            message: report.message.clone(),
                        });
                        return Ok(report);
                    }
                }
            }
        }
    }

    fn spawn_deploy(&self, reason: DeployReason) -> StagehandResult<()> {
        let deployer = Arc::clone(&self.deployer);
        let source = Arc::clone(&self.source);
        let credentials = Arc::clone(&self.credentials);
        let current = self.current.clone();
        let tx = self.tx.clone();

        thread::Builder::new()
            .name("stagehand-deploy".to_string())
            .spawn(move || {
                let (instance, reloaded) = if reason.reloads_config() {
                    match source.load() {
                        Ok(fresh) => (fresh.clone(), Some(fresh)),
                        Err(e) => {
                            tracing::warn!("instance reload failed: {e}");
                            let outcome = DeploymentOutcome::failed(&current.name, e);
                            let _ = tx.send(Message::Finished {
                                reloaded: None,
                                outcome,
                            });
                            return;
                        }
                    }
                } else {
                    (current, None)
                };

                tracing::info!(
                    instance = %instance.name,
                    stage = %instance.stage,
                    ?reason,
                    "deploying"
                );
                let outcome = deployer.deploy(&instance, &credentials);
                let _ = tx.send(Message::Finished { reloaded, outcome });
            })?;
        Ok(())
    }

    fn present<F>(&self, outcome: DeploymentOutcome, live: bool, on_event: &F)
    where
        F: Fn(DevEvent),
    {
        if outcome.is_active() {
            if let Some(target) = &outcome.target {
                self.restart_stream(target, live, on_event);
            }
            on_event(DevEvent::Deployed {
                instance: outcome.instance_name,
                outputs: outcome.outputs,
            });
        } else {
            let detail = outcome
                .error
                .as_ref()
                .map(|e| e.detail().to_string())
                .unwrap_or_else(|| "deployment failed".to_string());
            on_event(DevEvent::DeployFailed {
                instance: outcome.instance_name,
                detail,
            });
        }

        if live {
            on_event(DevEvent::Watching);
        }
    }

    fn restart_stream<F>(&self, target: &ExecutionTarget, start: bool, on_event: &F)
    where
        F: Fn(DevEvent),
    {
        if let Err(e) = self.log_stream.stop(target) {
            tracing::warn!(function = %target.function, "failed to stop log stream: {e}");
            on_event(DevEvent::StreamWarning {
                message: format!("could not stop remote log stream: {e}"),
            });
        }
        if start {
            if let Err(e) = self.log_stream.start(target) {
                tracing::warn!(function = %target.function, "failed to start log stream: {e}");
                on_event(DevEvent::StreamWarning {
                    message: format!("could not start remote log stream: {e}"),
                });
            }
        }
    }
}
