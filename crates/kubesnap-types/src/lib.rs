//! Shared record types for kubesnap
//!
//! Flat, normalized representations of the cluster resources kubesnap
//! collects. Quantities are pre-converted to integer units (millicores and
//! bytes) so consumers never deal with Kubernetes quantity strings.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Normalized Resource Records
// ============================================================================

/// A namespace in the cluster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamespaceRecord {
    pub name: String,
    /// Creation time, if the cluster reported one
    pub created_at: Option<DateTime<Utc>>,
}

/// A node and its reported capacity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    /// CPU capacity in millicores (1000 = one full core)
    pub cpu_millis: i64,
    /// Memory capacity in bytes
    pub memory_bytes: i64,
}

/// A pod with the resource figures of its first container.
///
/// Pods with several containers are deliberately summarized by their first
/// container only. A pod with no containers reports zero for all four
/// resource fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PodRecord {
    pub uid: String,
    pub name: String,
    pub namespace: String,
    /// Empty while the pod is unscheduled
    pub node_name: String,
    pub labels: BTreeMap<String, String>,
    pub created_at: Option<DateTime<Utc>>,
    /// CPU request of the first container, in millicores
    pub cpu_request_millis: i64,
    /// CPU limit of the first container, in millicores
    pub cpu_limit_millis: i64,
    /// Memory request of the first container, in bytes
    pub memory_request_bytes: i64,
    /// Memory limit of the first container, in bytes
    pub memory_limit_bytes: i64,
}

/// A service together with its port declarations.
///
/// Ports keep the order the cluster returned them in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub namespace: String,
    pub service_type: ServiceType,
    /// "None" for headless services, empty when the cluster reports no IP
    pub cluster_ip: String,
    pub selector: BTreeMap<String, String>,
    pub ports: Vec<PortRecord>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Service type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    ClusterIP,
    NodePort,
    LoadBalancer,
    ExternalName,
}

impl From<&str> for ServiceType {
    fn from(value: &str) -> Self {
        match value {
            "NodePort" => Self::NodePort,
            "LoadBalancer" => Self::LoadBalancer,
            "ExternalName" => Self::ExternalName,
            _ => Self::ClusterIP,
        }
    }
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClusterIP => "ClusterIP",
            Self::NodePort => "NodePort",
            Self::LoadBalancer => "LoadBalancer",
            Self::ExternalName => "ExternalName",
        }
    }
}

/// One port declaration of a service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Empty for unnamed ports
    pub name: String,
    pub port: i32,
    /// Resolved to 0 when the declaration names a port instead of numbering it
    pub target_port: i32,
    pub protocol: PortProtocol,
}

/// Transport protocol of a service port
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortProtocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl From<&str> for PortProtocol {
    fn from(value: &str) -> Self {
        match value {
            "UDP" => Self::Udp,
            "SCTP" => Self::Sctp,
            _ => Self::Tcp,
        }
    }
}

impl PortProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        }
    }
}

/// A horizontal pod autoscaler.
///
/// Absent spec fields fall back to cluster defaults: min replicas 1,
/// utilization targets 0 when no matching resource metric is configured, and
/// current replicas 0 while the status is unpopulated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HpaRecord {
    pub name: String,
    pub namespace: String,
    /// Kind of the scale target, e.g. "Deployment"
    pub target_kind: String,
    pub target_name: String,
    pub min_replicas: i32,
    pub max_replicas: i32,
    /// Target CPU utilization percentage, 0 when no cpu metric is set
    pub target_cpu_utilization: i32,
    /// Target memory utilization percentage, 0 when no memory metric is set
    pub target_memory_utilization: i32,
    pub current_replicas: i32,
    pub desired_replicas: i32,
}

// ============================================================================
// Resource Kinds
// ============================================================================

/// The resource kinds kubesnap collects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Namespace,
    Node,
    Pod,
    Service,
    Hpa,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Namespace => "namespaces",
            Self::Node => "nodes",
            Self::Pod => "pods",
            Self::Service => "services",
            Self::Hpa => "horizontal pod autoscalers",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
