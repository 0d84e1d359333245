//! Fakes shared by application-layer tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use crate::domain::entities::{
    CredentialMap, ExecutionTarget, InstanceDescriptor, InstanceInfo, InstanceKey,
};
use crate::domain::ports::{Clock, DeploymentClient, LogStream};
use crate::error::PlatformError;

pub fn instance(name: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        org: "acme".to_string(),
        app: "shop".to_string(),
        stage: "dev".to_string(),
        name: name.to_string(),
        component: "express".to_string(),
        inputs: Value::Null,
    }
}

pub fn info(status: &str, outputs: Value) -> InstanceInfo {
    serde_json::from_value(json!({
        "instanceName": "api",
        "instanceStatus": status,
        "outputs": outputs,
        "state": { "lambdaArn": "arn:aws:lambda:us-east-1:1:function:api", "region": "us-east-1" },
    }))
    .unwrap()
}

pub fn target() -> ExecutionTarget {
    ExecutionTarget {
        function: "arn:aws:lambda:us-east-1:1:function:api".to_string(),
        region: "us-east-1".to_string(),
    }
}

/// Clock that only moves when slept on
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Arc<Mutex<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        // Always advance so a zero interval still makes progress
        *self.now.lock().unwrap() += duration.max(Duration::from_millis(1));
    }
}

/// Platform client that replays a fixed list of status responses
pub struct ScriptedClient {
    deploy_error: Option<PlatformError>,
    responses: Mutex<VecDeque<Result<InstanceInfo, PlatformError>>>,
    repeat: Option<InstanceInfo>,
    deploys: AtomicUsize,
    polls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<InstanceInfo, PlatformError>>) -> Self {
        Self {
            deploy_error: None,
            responses: Mutex::new(responses.into()),
            repeat: None,
            deploys: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        }
    }

    /// Answer every poll with `info`
    pub fn always(info: InstanceInfo) -> Self {
        let mut client = Self::new(vec![]);
        client.repeat = Some(info);
        client
    }

    pub fn failing_deploy(mut self, error: PlatformError) -> Self {
        self.deploy_error = Some(error);
        self
    }

    pub fn deploys(&self) -> usize {
        self.deploys.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl DeploymentClient for ScriptedClient {
    fn deploy(
        &self,
        _instance: &InstanceDescriptor,
        _credentials: &CredentialMap,
    ) -> Result<(), PlatformError> {
        self.deploys.fetch_add(1, Ordering::SeqCst);
        match &self.deploy_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn get_instance(&self, _key: InstanceKey<'_>) -> Result<InstanceInfo, PlatformError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            return next;
        }
        self.repeat.clone().ok_or_else(|| PlatformError::Decode {
            url: "scripted".to_string(),
            message: "script exhausted".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamCall {
    Start(String),
    Stop(String),
}

/// Log stream that records what it was asked to do
#[derive(Default)]
pub struct RecordingLogStream {
    calls: Mutex<Vec<StreamCall>>,
}

impl RecordingLogStream {
    pub fn calls(&self) -> Vec<StreamCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl LogStream for RecordingLogStream {
    fn start(&self, target: &ExecutionTarget) -> Result<(), PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push(StreamCall::Start(target.function.clone()));
        Ok(())
    }

    fn stop(&self, target: &ExecutionTarget) -> Result<(), PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push(StreamCall::Stop(target.function.clone()));
        Ok(())
    }
}
