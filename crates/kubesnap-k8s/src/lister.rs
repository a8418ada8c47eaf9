//! Raw resource listing.
//!
//! `ResourceLister` is the seam between the collector and the API server.
//! The live implementation goes through kube; tests substitute an in-memory
//! one.

use async_trait::async_trait;
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::Api;
use kube::api::ListParams;

use kubesnap_types::ResourceKind;

use crate::error::ListError;

/// Listing access for the resource kinds kubesnap collects.
///
/// For namespaced kinds a `None` namespace means all namespaces.
#[async_trait]
pub trait ResourceLister: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ListError>;

    async fn list_nodes(&self) -> Result<Vec<Node>, ListError>;

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ListError>;

    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<Service>, ListError>;

    async fn list_hpas(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<HorizontalPodAutoscaler>, ListError>;
}

/// Lister backed by a live cluster connection
#[derive(Clone)]
pub struct KubeLister {
    client: kube::Client,
}

impl KubeLister {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceLister for KubeLister {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ListError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ListError::new(ResourceKind::Namespace, err))?;
        tracing::debug!(count = list.items.len(), "listed namespaces");
        Ok(list.items)
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, ListError> {
        let api: Api<Node> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ListError::new(ResourceKind::Node, err))?;
        tracing::debug!(count = list.items.len(), "listed nodes");
        Ok(list.items)
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ListError> {
        let api: Api<Pod> = match namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ListError::new(ResourceKind::Pod, err))?;
        tracing::debug!(count = list.items.len(), "listed pods");
        Ok(list.items)
    }

    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<Service>, ListError> {
        let api: Api<Service> = match namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ListError::new(ResourceKind::Service, err))?;
        tracing::debug!(count = list.items.len(), "listed services");
        Ok(list.items)
    }

    async fn list_hpas(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<HorizontalPodAutoscaler>, ListError> {
        let api: Api<HorizontalPodAutoscaler> = match namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ListError::new(ResourceKind::Hpa, err))?;
        tracing::debug!(count = list.items.len(), "listed horizontal pod autoscalers");
        Ok(list.items)
    }
}
