//! Shared in-memory doubles for the control plane and the provisioner

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{OrchestratorError, Result};
use crate::probes::ControlPlane;
use crate::provisioner::{PortMapping, Provisioner};

/// One queued outcome for a control-plane read.
#[derive(Debug, Clone)]
pub enum PhaseReply {
    Phase(Option<String>),
    Fail(String),
}

pub struct MockControlPlane {
    api_ok: bool,
    pod_replies: Mutex<VecDeque<PhaseReply>>,
    namespace_replies: Mutex<VecDeque<PhaseReply>>,
    /// Returned once the respective queue runs dry.
    pod_default: Mutex<PhaseReply>,
    namespace_default: Mutex<PhaseReply>,
    pub api_calls: AtomicUsize,
    pub pod_calls: AtomicUsize,
    pub namespace_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self {
            api_ok: true,
            pod_replies: Mutex::new(VecDeque::new()),
            namespace_replies: Mutex::new(VecDeque::new()),
            pod_default: Mutex::new(PhaseReply::Phase(None)),
            namespace_default: Mutex::new(PhaseReply::Phase(None)),
            api_calls: AtomicUsize::new(0),
            pod_calls: AtomicUsize::new(0),
            namespace_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn api_unreachable(mut self) -> Self {
        self.api_ok = false;
        self
    }

    pub fn push_pod(&self, reply: PhaseReply) {
        self.pod_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_namespace(&self, reply: PhaseReply) {
        self.namespace_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_pod_default(&self, reply: PhaseReply) {
        *self.pod_default.lock().unwrap() = reply;
    }

    pub fn set_namespace_default(&self, reply: PhaseReply) {
        *self.namespace_default.lock().unwrap() = reply;
    }

    pub fn control_plane_reads(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
            + self.pod_calls.load(Ordering::SeqCst)
            + self.namespace_calls.load(Ordering::SeqCst)
    }

    fn resolve(reply: PhaseReply) -> Result<Option<String>> {
        match reply {
            PhaseReply::Phase(phase) => Ok(phase),
            PhaseReply::Fail(message) => Err(OrchestratorError::Internal(message)),
        }
    }
}

impl ControlPlane for MockControlPlane {
    async fn check_api(&self) -> Result<()> {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
        if self.api_ok {
            Ok(())
        } else {
            Err(OrchestratorError::Internal(
                "connection refused".to_string(),
            ))
        }
    }

    async fn pod_phase(&self, _namespace: &str, _selector: &str) -> Result<Option<String>> {
        self.pod_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .pod_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.pod_default.lock().unwrap().clone());
        Self::resolve(reply)
    }

    async fn namespace_phase(&self, _name: &str) -> Result<Option<String>> {
        self.namespace_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .namespace_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.namespace_default.lock().unwrap().clone());
        Self::resolve(reply)
    }

    async fn create_namespace(&self, _name: &str) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_namespace(&self, _name: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockProvisioner {
    pub fail_with: Option<String>,
    pub created: Mutex<Vec<(String, Vec<PortMapping>)>>,
    pub deleted: Mutex<Vec<String>>,
    pub started: Mutex<Vec<String>>,
    pub stopped: Mutex<Vec<String>>,
}

impl MockProvisioner {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn outcome(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(OrchestratorError::CommandFailed {
                command: "k3d".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Provisioner for MockProvisioner {
    async fn create_cluster(&self, name: &str, ports: &[PortMapping]) -> Result<()> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), ports.to_vec()));
        self.outcome()
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(name.to_string());
        self.outcome()
    }

    async fn start_cluster(&self, name: &str) -> Result<()> {
        self.started.lock().unwrap().push(name.to_string());
        self.outcome()
    }

    async fn stop_cluster(&self, name: &str) -> Result<()> {
        self.stopped.lock().unwrap().push(name.to_string());
        self.outcome()
    }
}
