//! Kubernetes collection layer for kubesnap
//!
//! Connects to a cluster and produces normalized records for namespaces,
//! nodes, pods, services, and horizontal pod autoscalers. Quantities are
//! converted to millicores and bytes on the way in, so downstream code never
//! sees Kubernetes quantity strings.

mod client;
mod collect;
mod convert;
mod error;
mod lister;
mod quantity;

pub use client::connect;
pub use collect::Collector;
pub use error::ListError;
pub use lister::{KubeLister, ResourceLister};

// Re-export types that are used in our public API
pub use kubesnap_types::{
    HpaRecord, NamespaceRecord, NodeRecord, PodRecord, PortProtocol, PortRecord, ResourceKind,
    ServiceRecord, ServiceType,
};
