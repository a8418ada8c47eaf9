//! The collector turns raw listings into normalized records.

use kubesnap_types::{HpaRecord, NamespaceRecord, NodeRecord, PodRecord, ServiceRecord};

use crate::convert;
use crate::error::ListError;
use crate::lister::ResourceLister;

/// Collects normalized snapshots of cluster resources.
///
/// Each call lists afresh and reflects the cluster at that moment; the
/// collector holds no cache. Records keep the order the cluster returned
/// them in.
pub struct Collector<L> {
    lister: L,
}

impl<L: ResourceLister> Collector<L> {
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    pub async fn get_namespaces(&self) -> Result<Vec<NamespaceRecord>, ListError> {
        let items = self.lister.list_namespaces().await?;
        Ok(items
            .into_iter()
            .map(convert::namespace_to_record)
            .collect())
    }

    pub async fn get_nodes(&self) -> Result<Vec<NodeRecord>, ListError> {
        let items = self.lister.list_nodes().await?;
        Ok(items.into_iter().map(convert::node_to_record).collect())
    }

    /// Pods across all namespaces
    pub async fn get_pods(&self) -> Result<Vec<PodRecord>, ListError> {
        let items = self.lister.list_pods(None).await?;
        Ok(items.into_iter().map(convert::pod_to_record).collect())
    }

    /// Pods in one namespace. An empty name means all namespaces.
    pub async fn get_pods_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Vec<PodRecord>, ListError> {
        let items = self.lister.list_pods(scope(namespace)).await?;
        Ok(items.into_iter().map(convert::pod_to_record).collect())
    }

    /// Services across all namespaces
    pub async fn get_services(&self) -> Result<Vec<ServiceRecord>, ListError> {
        let items = self.lister.list_services(None).await?;
        Ok(items.into_iter().map(convert::service_to_record).collect())
    }

    /// Services in one namespace. An empty name means all namespaces.
    pub async fn get_services_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Vec<ServiceRecord>, ListError> {
        let items = self.lister.list_services(scope(namespace)).await?;
        Ok(items.into_iter().map(convert::service_to_record).collect())
    }

    /// Horizontal pod autoscalers across all namespaces
    pub async fn get_hpas(&self) -> Result<Vec<HpaRecord>, ListError> {
        let items = self.lister.list_hpas(None).await?;
        Ok(items.into_iter().map(convert::hpa_to_record).collect())
    }

    /// Horizontal pod autoscalers in one namespace. An empty name means all
    /// namespaces.
    pub async fn get_hpas_by_namespace(
        &self,
        namespace: &str,
    ) -> Result<Vec<HpaRecord>, ListError> {
        let items = self.lister.list_hpas(scope(namespace)).await?;
        Ok(items.into_iter().map(convert::hpa_to_record).collect())
    }
}

/// Maps the empty string to the all-namespaces scope
fn scope(namespace: &str) -> Option<&str> {
    if namespace.is_empty() {
        None
    } else {
        Some(namespace)
    }
}
