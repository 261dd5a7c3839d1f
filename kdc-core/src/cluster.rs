//! Cluster lifecycle executor
//!
//! Create and start do not return until the cluster is observably ready:
//! API server answering, then CoreDNS and metrics-server pods Running.
//! Delete and stop only wait for the provisioning command itself.

use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::config::Config;
use crate::errors::{OrchestratorError, Result};
use crate::probes::{self, COREDNS_SELECTOR, ControlPlane, KUBE_SYSTEM, METRICS_SERVER_SELECTOR};
use crate::provisioner::Provisioner;
use crate::retry::{RetryPolicy, Verdict, wait_until_ready};

/// Budget for each dependent-system check after the cluster comes up.
pub const CLUSTER_READY_POLICY: RetryPolicy = RetryPolicy::new(10, Duration::from_secs(5));

/// Unconditional pause between the API server answering and the first pod
/// check, covering known CoreDNS startup latency that would otherwise burn
/// retry budget.
pub const WARMUP_PAUSE: Duration = Duration::from_secs(30);

pub async fn create(
    provisioner: &impl Provisioner,
    control_plane: &impl ControlPlane,
    config: &Config,
) -> Result<()> {
    info!("cluster '{}' is being created", config.cluster_name);
    provisioner
        .create_cluster(&config.cluster_name, &config.ports)
        .await?;
    info!(
        "cluster '{}' created, waiting for readiness",
        config.cluster_name
    );
    wait_cluster_ready(control_plane, &config.cluster_name).await
}

pub async fn delete(provisioner: &impl Provisioner, config: &Config) -> Result<()> {
    info!("cluster '{}' is being deleted", config.cluster_name);
    provisioner.delete_cluster(&config.cluster_name).await?;
    info!("cluster '{}' deleted successfully", config.cluster_name);
    Ok(())
}

/// Start an existing cluster. The cluster must become observably ready
/// again, not merely accept the start command.
pub async fn start(
    provisioner: &impl Provisioner,
    control_plane: &impl ControlPlane,
    config: &Config,
) -> Result<()> {
    info!("starting cluster '{}'", config.cluster_name);
    provisioner.start_cluster(&config.cluster_name).await?;
    info!(
        "cluster '{}' started, waiting for readiness",
        config.cluster_name
    );
    wait_cluster_ready(control_plane, &config.cluster_name).await
}

pub async fn stop(provisioner: &impl Provisioner, config: &Config) -> Result<()> {
    info!("stopping cluster '{}'", config.cluster_name);
    provisioner.stop_cluster(&config.cluster_name).await?;
    info!("cluster '{}' stopped successfully", config.cluster_name);
    Ok(())
}

/// Full readiness chain: one API reachability check, the warm-up pause,
/// then CoreDNS and metrics-server each under the retry driver.
async fn wait_cluster_ready(
    control_plane: &impl ControlPlane,
    cluster_name: &str,
) -> Result<()> {
    match probes::api_reachable(control_plane).await {
        Verdict::Ready => {}
        Verdict::NotReady(reason) | Verdict::Unrecoverable(reason) => {
            return Err(OrchestratorError::ProbeFailed {
                what: format!("cluster '{}' API server", cluster_name),
                reason,
            });
        }
    }

    info!("waiting {:?} for CoreDNS to start", WARMUP_PAUSE);
    sleep(WARMUP_PAUSE).await;

    wait_until_ready("CoreDNS", &CLUSTER_READY_POLICY, || {
        probes::workload_running(control_plane, KUBE_SYSTEM, COREDNS_SELECTOR)
    })
    .await?;

    wait_until_ready("metrics-server", &CLUSTER_READY_POLICY, || {
        probes::workload_running(control_plane, KUBE_SYSTEM, METRICS_SERVER_SELECTOR)
    })
    .await?;

    info!("cluster '{}' is ready", cluster_name);
    Ok(())
}
