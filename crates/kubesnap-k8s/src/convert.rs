//! Mapping from raw API objects to normalized records.
//!
//! Every mapper is total. Missing metadata, spec, or status blocks degrade
//! to the documented defaults instead of failing the conversion.

use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service, ServicePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use kubesnap_types::{
    HpaRecord, NamespaceRecord, NodeRecord, PodRecord, PortProtocol, PortRecord, ServiceRecord,
    ServiceType,
};

use crate::quantity;

pub(crate) fn namespace_to_record(namespace: Namespace) -> NamespaceRecord {
    NamespaceRecord {
        name: namespace.metadata.name.unwrap_or_default(),
        created_at: namespace.metadata.creation_timestamp.map(|t| t.0),
    }
}

/// Capacity figures come from `status.capacity`, not `allocatable`.
pub(crate) fn node_to_record(node: Node) -> NodeRecord {
    let capacity = node
        .status
        .and_then(|status| status.capacity)
        .unwrap_or_default();

    NodeRecord {
        name: node.metadata.name.unwrap_or_default(),
        cpu_millis: quantity::cpu_millis(capacity.get("cpu")),
        memory_bytes: quantity::memory_bytes(capacity.get("memory")),
    }
}

/// Resource figures reflect the first container only. Pods with no
/// containers report zero for all four resource fields.
pub(crate) fn pod_to_record(pod: Pod) -> PodRecord {
    let spec = pod.spec.unwrap_or_default();
    let resources = spec
        .containers
        .into_iter()
        .next()
        .and_then(|container| container.resources)
        .unwrap_or_default();
    let requests = resources.requests.unwrap_or_default();
    let limits = resources.limits.unwrap_or_default();

    PodRecord {
        uid: pod.metadata.uid.unwrap_or_default(),
        name: pod.metadata.name.unwrap_or_default(),
        namespace: pod.metadata.namespace.unwrap_or_default(),
        node_name: spec.node_name.unwrap_or_default(),
        labels: pod.metadata.labels.unwrap_or_default(),
        created_at: pod.metadata.creation_timestamp.map(|t| t.0),
        cpu_request_millis: quantity::cpu_millis(requests.get("cpu")),
        cpu_limit_millis: quantity::cpu_millis(limits.get("cpu")),
        memory_request_bytes: quantity::memory_bytes(requests.get("memory")),
        memory_limit_bytes: quantity::memory_bytes(limits.get("memory")),
    }
}

pub(crate) fn service_to_record(service: Service) -> ServiceRecord {
    let spec = service.spec.unwrap_or_default();
    let service_type = spec
        .type_
        .as_deref()
        .map(ServiceType::from)
        .unwrap_or_default();
    let ports = spec
        .ports
        .unwrap_or_default()
        .into_iter()
        .map(port_to_record)
        .collect();

    ServiceRecord {
        name: service.metadata.name.unwrap_or_default(),
        namespace: service.metadata.namespace.unwrap_or_default(),
        service_type,
        cluster_ip: spec.cluster_ip.unwrap_or_default(),
        selector: spec.selector.unwrap_or_default(),
        ports,
        created_at: service.metadata.creation_timestamp.map(|t| t.0),
    }
}

fn port_to_record(port: ServicePort) -> PortRecord {
    PortRecord {
        name: port.name.unwrap_or_default(),
        port: port.port,
        target_port: port.target_port.as_ref().map_or(0, target_port_number),
        protocol: port
            .protocol
            .as_deref()
            .map(PortProtocol::from)
            .unwrap_or_default(),
    }
}

/// Named target ports have no numeric value without a pod lookup, so they
/// resolve to 0.
fn target_port_number(target: &IntOrString) -> i32 {
    match target {
        IntOrString::Int(number) => *number,
        IntOrString::String(name) => name.parse().unwrap_or(0),
    }
}

pub(crate) fn hpa_to_record(hpa: HorizontalPodAutoscaler) -> HpaRecord {
    let spec = hpa.spec.unwrap_or_default();
    let status = hpa.status.unwrap_or_default();
    let metrics = spec.metrics.unwrap_or_default();

    HpaRecord {
        name: hpa.metadata.name.unwrap_or_default(),
        namespace: hpa.metadata.namespace.unwrap_or_default(),
        target_kind: spec.scale_target_ref.kind,
        target_name: spec.scale_target_ref.name,
        min_replicas: spec.min_replicas.unwrap_or(1),
        max_replicas: spec.max_replicas,
        target_cpu_utilization: quantity::utilization_target(&metrics, "cpu"),
        target_memory_utilization: quantity::utilization_target(&metrics, "memory"),
        current_replicas: status.current_replicas.unwrap_or(0),
        desired_replicas: status.desired_replicas,
    }
}
