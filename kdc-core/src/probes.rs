//! Read-only readiness checks against the control plane
//!
//! Each probe issues one query through the [`ControlPlane`] capability and
//! reduces the response to a [`Verdict`]. Probes never sleep or retry on
//! their own; the retry driver owns that.

use crate::errors::Result;
use crate::retry::Verdict;

pub const KUBE_SYSTEM: &str = "kube-system";
pub const COREDNS_SELECTOR: &str = "k8s-app=kube-dns";
pub const METRICS_SERVER_SELECTOR: &str = "k8s-app=metrics-server";

const RUNNING_PHASE: &str = "Running";
const ACTIVE_PHASE: &str = "Active";

/// Operations the orchestrator needs from the Kubernetes API.
///
/// Implemented by the real kube client and by in-memory doubles in tests.
#[allow(async_fn_in_trait)]
pub trait ControlPlane {
    /// Lightweight reachability query against the API server.
    async fn check_api(&self) -> Result<()>;

    /// Phase of the first pod matching `selector` in `namespace`, or `None`
    /// when no pod matches yet.
    async fn pod_phase(&self, namespace: &str, selector: &str) -> Result<Option<String>>;

    /// Phase of the namespace, or `None` when it does not exist.
    async fn namespace_phase(&self, name: &str) -> Result<Option<String>>;

    async fn create_namespace(&self, name: &str) -> Result<()>;

    async fn delete_namespace(&self, name: &str) -> Result<()>;
}

/// Ready as soon as the API server answers at all. A failed query means the
/// control plane is unreachable, which retrying one probe will not fix.
pub async fn api_reachable(control_plane: &impl ControlPlane) -> Verdict {
    match control_plane.check_api().await {
        Ok(()) => Verdict::Ready,
        Err(e) => Verdict::Unrecoverable(format!("cannot reach API server: {}", e)),
    }
}

/// Ready when the first pod matching `selector` reports the Running phase.
/// A missing pod is expected right after cluster creation and is treated as
/// not-ready rather than fatal.
pub async fn workload_running(
    control_plane: &impl ControlPlane,
    namespace: &str,
    selector: &str,
) -> Verdict {
    match control_plane.pod_phase(namespace, selector).await {
        Ok(Some(phase)) if phase == RUNNING_PHASE => Verdict::Ready,
        Ok(Some(phase)) => Verdict::NotReady(format!("pod phase is {}", phase)),
        Ok(None) => Verdict::NotReady(format!("no pod matching {} yet", selector)),
        Err(e) => Verdict::Unrecoverable(e.to_string()),
    }
}

/// Ready when the namespace reports the Active phase.
pub async fn namespace_active(control_plane: &impl ControlPlane, name: &str) -> Verdict {
    match control_plane.namespace_phase(name).await {
        Ok(Some(phase)) if phase == ACTIVE_PHASE => Verdict::Ready,
        Ok(Some(phase)) => Verdict::NotReady(format!("namespace phase is {}", phase)),
        Ok(None) => Verdict::NotReady("namespace not found yet".to_string()),
        Err(e) => Verdict::Unrecoverable(e.to_string()),
    }
}

/// Ready when the namespace no longer exists. Used after a delete, where
/// absence is the success condition.
pub async fn namespace_absent(control_plane: &impl ControlPlane, name: &str) -> Verdict {
    match control_plane.namespace_phase(name).await {
        Ok(None) => Verdict::Ready,
        Ok(Some(phase)) => Verdict::NotReady(format!("namespace still {}", phase)),
        Err(e) => Verdict::Unrecoverable(e.to_string()),
    }
}
