//! Routes a parsed command to the matching executor
//!
//! Actions are validated before any configuration is read or any client is
//! built, so an unrecognized action never touches the control plane.

use std::str::FromStr;

use kdc_core::client::KubeControlPlane;
use kdc_core::config::Config;
use kdc_core::provisioner::{K3d, StderrPolicy};
use kdc_core::{cluster, namespace};
use tracing::debug;

use crate::commands::Commands;
use crate::errors::{CliError, Result};

const CLUSTER_ACTIONS: &str = "'create', 'delete', 'start', or 'stop'";
const NAMESPACE_ACTIONS: &str = "'create', 'delete', or 'reset'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterAction {
    Create,
    Delete,
    Start,
    Stop,
}

impl FromStr for ClusterAction {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            _ => Err(CliError::InvalidAction {
                action: s.to_string(),
                expected: CLUSTER_ACTIONS,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceAction {
    Create,
    Delete,
    Reset,
}

impl FromStr for NamespaceAction {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "reset" => Ok(Self::Reset),
            _ => Err(CliError::InvalidAction {
                action: s.to_string(),
                expected: NAMESPACE_ACTIONS,
            }),
        }
    }
}

pub async fn run(command: Commands) -> Result<()> {
    debug!("dispatching {:?}", command);
    match command {
        Commands::Cluster {
            action,
            tolerate_stderr,
        } => {
            let action: ClusterAction = action.parse()?;
            let config = Config::from_env()?;
            let stderr_policy = if tolerate_stderr {
                StderrPolicy::WarnOnly
            } else {
                StderrPolicy::Fatal
            };
            let provisioner = K3d::new(stderr_policy);
            match action {
                ClusterAction::Create => {
                    let control_plane = KubeControlPlane::connect().await?;
                    cluster::create(&provisioner, &control_plane, &config).await?;
                }
                ClusterAction::Delete => cluster::delete(&provisioner, &config).await?,
                ClusterAction::Start => {
                    let control_plane = KubeControlPlane::connect().await?;
                    cluster::start(&provisioner, &control_plane, &config).await?;
                }
                ClusterAction::Stop => cluster::stop(&provisioner, &config).await?,
            }
        }

        Commands::Namespace { name, action } => {
            let action: NamespaceAction = action.parse()?;
            let control_plane = KubeControlPlane::connect().await?;
            match action {
                NamespaceAction::Create => namespace::create(&control_plane, &name).await?,
                NamespaceAction::Delete => namespace::delete(&control_plane, &name).await?,
                NamespaceAction::Reset => namespace::reset(&control_plane, &name).await?,
            }
        }
    }

    Ok(())
}
