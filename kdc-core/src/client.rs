//! Real control-plane implementation backed by the kube client

use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{Api, DeleteParams, ListParams, ObjectMeta, PostParams};
use kube::Client;

use crate::errors::Result;
use crate::probes::ControlPlane;

pub struct KubeControlPlane {
    client: Client,
}

impl KubeControlPlane {
    /// Connect using the default kubeconfig resolution (in-cluster env or
    /// `~/.kube/config`).
    pub async fn connect() -> Result<Self> {
        Ok(Self {
            client: Client::try_default().await?,
        })
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }
}

impl ControlPlane for KubeControlPlane {
    async fn check_api(&self) -> Result<()> {
        self.client.apiserver_version().await?;
        Ok(())
    }

    async fn pod_phase(&self, namespace: &str, selector: &str) -> Result<Option<String>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods
            .list(&ListParams::default().labels(selector).limit(1))
            .await?;
        Ok(list
            .items
            .into_iter()
            .next()
            .and_then(|pod| pod.status.and_then(|status| status.phase)))
    }

    async fn namespace_phase(&self, name: &str) -> Result<Option<String>> {
        match self.namespaces().get(name).await {
            Ok(ns) => Ok(Some(
                ns.status.and_then(|status| status.phase).unwrap_or_default(),
            )),
            Err(kube::Error::Api(e)) if e.code == 404 => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_namespace(&self, name: &str) -> Result<()> {
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        self.namespaces().create(&PostParams::default(), &ns).await?;
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<()> {
        self.namespaces()
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
