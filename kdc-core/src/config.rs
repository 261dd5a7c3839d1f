//! Cluster configuration built once from the environment
//!
//! No ambient globals: the config is constructed from validated inputs and
//! passed by reference into the executors.

use crate::errors::{OrchestratorError, Result};
use crate::provisioner::PortMapping;

pub const ENV_CLUSTER_NAME: &str = "KDC_CLUSTER_NAME";

/// Environment variable, default host port, fixed loadbalancer node port.
const PORT_VARS: &[(&str, u16, u16)] = &[
    ("KDC_LOCAL_PORT_8090", 8090, 16080),
    ("KDC_LOCAL_PORT_8010", 8010, 38010),
    ("KDC_LOCAL_PORT_5910", 5910, 35910),
    ("KDC_LOCAL_PORT_5000", 5000, 35000),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_name: String,
    pub ports: Vec<PortMapping>,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cluster_name = lookup(ENV_CLUSTER_NAME)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| OrchestratorError::Config(format!("{} is not set", ENV_CLUSTER_NAME)))?;

        let mut ports = Vec::with_capacity(PORT_VARS.len());
        for &(var, default_host, node_port) in PORT_VARS {
            let host_port = match lookup(var) {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    OrchestratorError::Config(format!("{} is not a valid port: '{}'", var, raw))
                })?,
                None => default_host,
            };
            ports.push(PortMapping {
                host_port,
                node_port,
            });
        }

        Ok(Self {
            cluster_name,
            ports,
        })
    }
}
