//! Dev mode coordinator
//!
//! A pure state machine: triggers go in, commands come out. The session
//! executes the commands (start a deploy, print a status, attach streaming)
//! and feeds the results back in as new triggers. Nothing here blocks or does
//! I/O, so every interleaving can be tested deterministically.
//!
//! At most one deploy is ever in flight. Changes that arrive while a deploy is
//! running collapse into a single pending marker, and exactly one follow-up
//! deploy runs when the current one settles.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{DeploymentOutcome, InstanceStatus};

pub const STATUS_ENABLING: &str = "Enabling Dev Mode";
pub const STATUS_DEPLOYING: &str = "Deploying";
pub const STATUS_CLOSING: &str = "Disabling Dev Mode & Closing";

pub const CLOSED_MESSAGE: &str = "Dev Mode Closed";
pub const CANCELED_MESSAGE: &str =
    "Dev Mode Canceled.  Run \"stagehand deploy\" To Remove Dev Mode Agent.";
pub const TEARDOWN_FAILED_MESSAGE: &str =
    "Dev Mode Teardown Failed.  Run \"stagehand deploy\" To Remove Dev Mode Agent.";

/// Why a deploy was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployReason {
    /// First deploy after the watcher is ready
    Initial,
    /// A file changed while idle
    Change,
    /// Follow-up for changes that arrived during the previous deploy
    Queued,
    /// Final deploy with debugging disabled
    Teardown,
}

impl DeployReason {
    /// Change-driven deploys re-read the instance file first
    pub fn reloads_config(self) -> bool {
        matches!(self, DeployReason::Change | DeployReason::Queued)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseStatus {
    Success,
    Error,
}

/// How the session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReport {
    pub status: CloseStatus,
    pub message: String,
}

impl CloseReport {
    fn success(message: &str) -> Self {
        Self {
            status: CloseStatus::Success,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            status: CloseStatus::Error,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CloseStatus::Success
    }
}

#[derive(Debug, Clone)]
pub enum Trigger {
    /// The filesystem subscription is established
    Ready,
    /// A watched file changed
    Changed(PathBuf),
    /// The in-flight deploy settled
    DeployFinished(DeploymentOutcome),
    /// The user asked to stop
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Update the status line
    Status(&'static str),
    /// Start a deploy on the worker
    Deploy(DeployReason),
    /// Report a settled outcome to the user.
    ///
    /// `live` is false for the teardown outcome: no debug restart and no
    /// "Watching" status afterwards.
    Present { outcome: DeploymentOutcome, live: bool },
    /// A deploy settled with a status we do not understand
    Unrecognized { outcome: DeploymentOutcome },
    /// End the session
    Close(CloseReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Watching, nothing in flight
    Idle,
    /// One deploy in flight, nothing pending
    Deploying,
    /// One deploy in flight and at least one change waiting behind it
    DeployingWithQueued,
    /// Shutdown requested while a watch deploy was in flight
    Draining,
    /// Teardown deploy in flight
    TearingDown,
    Closed,
}

#[derive(Debug)]
pub struct Coordinator {
    state: CoordinatorState,
    started: bool,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            state: CoordinatorState::Idle,
            started: false,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == CoordinatorState::Closed
    }

    /// Whether a file change would still lead to a deploy
    pub fn accepts_changes(&self) -> bool {
        matches!(
            self.state,
            CoordinatorState::Idle
                | CoordinatorState::Deploying
                | CoordinatorState::DeployingWithQueued
        )
    }

    pub fn handle(&mut self, trigger: Trigger) -> Vec<Command> {
        use CoordinatorState::*;

        match (self.state, trigger) {
            (Closed, _) => Vec::new(),

            (Idle, Trigger::Ready) if !self.started => {
                self.started = true;
                self.state = Deploying;
                vec![
                    Command::Status(STATUS_ENABLING),
                    Command::Deploy(DeployReason::Initial),
                ]
            }
            (Idle, Trigger::Ready) => Vec::new(),
            (Deploying, Trigger::Ready) => {
                // Changes beat the ready signal; make sure a deploy follows
                self.started = true;
                self.state = DeployingWithQueued;
                Vec::new()
            }
            (_, Trigger::Ready) => {
                self.started = true;
                Vec::new()
            }

            (Idle, Trigger::Changed(_)) => {
                self.started = true;
                self.state = Deploying;
                vec![
                    Command::Status(STATUS_DEPLOYING),
                    Command::Deploy(DeployReason::Change),
                ]
            }
            (Deploying, Trigger::Changed(_)) => {
                self.state = DeployingWithQueued;
                Vec::new()
            }
            (_, Trigger::Changed(_)) => Vec::new(),

            (Deploying, Trigger::DeployFinished(outcome)) => {
                self.state = Idle;
                present(outcome, true)
            }
            (DeployingWithQueued, Trigger::DeployFinished(outcome)) => {
                // Superseded by the queued deploy; only the newest result is shown
                tracing::debug!(
                    status = %outcome.status,
                    "deploy superseded by queued changes"
                );
                self.state = Deploying;
                vec![
                    Command::Status(STATUS_DEPLOYING),
                    Command::Deploy(DeployReason::Queued),
                ]
            }
            (Draining, Trigger::DeployFinished(outcome)) => {
                tracing::debug!(status = %outcome.status, "deploy finished while closing");
                self.state = TearingDown;
                vec![
                    Command::Status(STATUS_CLOSING),
                    Command::Deploy(DeployReason::Teardown),
                ]
            }
            (TearingDown, Trigger::DeployFinished(outcome)) => {
                self.state = Closed;
                let report = if outcome.is_active() {
                    CloseReport::success(CLOSED_MESSAGE)
                } else {
                    CloseReport::error(TEARDOWN_FAILED_MESSAGE)
                };
                let mut commands = present(outcome, false);
                commands.push(Command::Close(report));
                commands
            }
            (Idle, Trigger::DeployFinished(outcome)) => {
                tracing::warn!(status = %outcome.status, "ignoring deploy result with nothing in flight");
                Vec::new()
            }

            (Idle, Trigger::Shutdown) => {
                self.state = TearingDown;
                vec![
                    Command::Status(STATUS_CLOSING),
                    Command::Deploy(DeployReason::Teardown),
                ]
            }
            (Deploying | DeployingWithQueued, Trigger::Shutdown) => {
                self.state = Draining;
                vec![Command::Status(STATUS_CLOSING)]
            }
            (Draining | TearingDown, Trigger::Shutdown) => {
                self.state = Closed;
                vec![Command::Close(CloseReport::error(CANCELED_MESSAGE))]
            }
        }
    }
}

fn present(outcome: DeploymentOutcome, live: bool) -> Vec<Command> {
    match outcome.status {
        InstanceStatus::Active | InstanceStatus::Error => {
            vec![Command::Present { outcome, live }]
        }
        _ => {
            tracing::error!(
                status = %outcome.status,
                instance = %outcome.instance_name,
                "deployment settled with unknown status"
            );
            vec![Command::Unrecognized { outcome }]
        }
    }
}
