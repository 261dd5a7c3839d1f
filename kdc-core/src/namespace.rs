//! Namespace lifecycle executor
//!
//! Create and delete are guarded by an existence check so repeated
//! invocations are safe no-ops. Both wait for the target state to be
//! observable, not merely for the API to accept the request.

use std::time::Duration;
use tracing::info;

use crate::errors::Result;
use crate::probes::{self, ControlPlane};
use crate::retry::{RetryPolicy, wait_until_ready};

pub const NAMESPACE_READY_POLICY: RetryPolicy = RetryPolicy::new(10, Duration::from_secs(2));

/// Create the namespace and wait until it reports the Active phase.
/// An existing namespace is a logged no-op.
pub async fn create(control_plane: &impl ControlPlane, name: &str) -> Result<()> {
    if let Some(phase) = control_plane.namespace_phase(name).await? {
        info!(
            "namespace '{}' already exists (phase {}), skipping creation",
            name, phase
        );
        return Ok(());
    }

    info!("namespace '{}' does not exist, creating", name);
    control_plane.create_namespace(name).await?;
    info!("namespace '{}' creation initiated", name);

    wait_until_ready(
        &format!("namespace '{}'", name),
        &NAMESPACE_READY_POLICY,
        || probes::namespace_active(control_plane, name),
    )
    .await?;

    info!("namespace '{}' created successfully", name);
    Ok(())
}

/// Delete the namespace and wait until it is gone. An absent namespace is
/// a logged no-op.
pub async fn delete(control_plane: &impl ControlPlane, name: &str) -> Result<()> {
    if control_plane.namespace_phase(name).await?.is_none() {
        info!("namespace '{}' does not exist, skipping deletion", name);
        return Ok(());
    }

    control_plane.delete_namespace(name).await?;
    info!("namespace '{}' deletion initiated", name);

    wait_until_ready(
        &format!("namespace '{}' deletion", name),
        &NAMESPACE_READY_POLICY,
        || probes::namespace_absent(control_plane, name),
    )
    .await?;

    info!("namespace '{}' deleted successfully", name);
    Ok(())
}

/// Delete then recreate, each with its full wait. Not atomic: a crash
/// between the two leaves the namespace absent, which is an observable
/// intermediate state.
pub async fn reset(control_plane: &impl ControlPlane, name: &str) -> Result<()> {
    delete(control_plane, name).await?;
    create(control_plane, name).await
}
