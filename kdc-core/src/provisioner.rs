//! Wrapper around the k3d provisioning binary
//!
//! Every mutating cluster operation goes through [`Provisioner`]. Command
//! failures are always fatal at this level; a failed provisioning call is
//! not transient and retrying it could double-apply side effects.

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::{OrchestratorError, Result};

pub const K3D_BIN: &str = "k3d";

/// One `host:node@loadbalancer` forwarding entry baked into cluster create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host_port: u16,
    pub node_port: u16,
}

impl PortMapping {
    pub fn flag_value(&self) -> String {
        format!("{}:{}@loadbalancer", self.host_port, self.node_port)
    }
}

/// How to treat a command that exits 0 but wrote to stderr.
///
/// Some provisioning tools print non-error diagnostics on the error stream.
/// `Fatal` treats any stderr output as a failure; `WarnOnly` logs it and
/// accepts the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StderrPolicy {
    #[default]
    Fatal,
    WarnOnly,
}

/// Mutating operations against the cluster-provisioning tool.
#[allow(async_fn_in_trait)]
pub trait Provisioner {
    async fn create_cluster(&self, name: &str, ports: &[PortMapping]) -> Result<()>;
    async fn delete_cluster(&self, name: &str) -> Result<()>;
    async fn start_cluster(&self, name: &str) -> Result<()>;
    async fn stop_cluster(&self, name: &str) -> Result<()>;
}

pub struct K3d {
    program: String,
    stderr_policy: StderrPolicy,
}

impl K3d {
    pub fn new(stderr_policy: StderrPolicy) -> Self {
        Self {
            program: K3D_BIN.to_string(),
            stderr_policy,
        }
    }

    async fn run(&self, args: &[String]) -> Result<()> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("running: {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| OrchestratorError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            let message = if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            };
            return Err(OrchestratorError::CommandFailed { command, message });
        }

        if !stderr.is_empty() {
            match self.stderr_policy {
                StderrPolicy::Fatal => {
                    return Err(OrchestratorError::CommandFailed {
                        command,
                        message: format!("stderr: {}", stderr),
                    });
                }
                StderrPolicy::WarnOnly => {
                    warn!("{}: stderr: {}", command, stderr);
                }
            }
        }

        Ok(())
    }
}

impl Default for K3d {
    fn default() -> Self {
        Self::new(StderrPolicy::default())
    }
}

impl Provisioner for K3d {
    async fn create_cluster(&self, name: &str, ports: &[PortMapping]) -> Result<()> {
        let mut args = vec![
            "cluster".to_string(),
            "create".to_string(),
            name.to_string(),
        ];
        for port in ports {
            args.push("--port".to_string());
            args.push(port.flag_value());
        }
        self.run(&args).await
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.run(&[
            "cluster".to_string(),
            "delete".to_string(),
            name.to_string(),
        ])
        .await
    }

    async fn start_cluster(&self, name: &str) -> Result<()> {
        self.run(&["cluster".to_string(), "start".to_string(), name.to_string()])
            .await
    }

    async fn stop_cluster(&self, name: &str) -> Result<()> {
        self.run(&["cluster".to_string(), "stop".to_string(), name.to_string()])
            .await
    }
}
