//! Collector tests against an in-memory resource lister.

use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::autoscaling::v2::{
    CrossVersionObjectReference, HorizontalPodAutoscaler, HorizontalPodAutoscalerSpec,
    HorizontalPodAutoscalerStatus, MetricSpec, MetricTarget, ResourceMetricSource,
};
use k8s_openapi::api::core::v1::{
    Container, Namespace, Node, NodeStatus, Pod, PodSpec, ResourceRequirements, Service,
    ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use kubesnap_k8s::{Collector, ListError, PortProtocol, ResourceKind, ResourceLister, ServiceType};

#[derive(Default)]
struct FakeLister {
    namespaces: Vec<Namespace>,
    nodes: Vec<Node>,
    pods: Vec<Pod>,
    services: Vec<Service>,
    hpas: Vec<HorizontalPodAutoscaler>,
    fail: Option<ResourceKind>,
}

impl FakeLister {
    fn check(&self, kind: ResourceKind) -> Result<(), ListError> {
        if self.fail == Some(kind) {
            return Err(ListError::new(
                kind,
                std::io::Error::other("connection refused"),
            ));
        }
        Ok(())
    }
}

fn selected(namespace: Option<&str>, metadata: &ObjectMeta) -> bool {
    match namespace {
        Some(namespace) => metadata.namespace.as_deref() == Some(namespace),
        None => true,
    }
}

#[async_trait]
impl ResourceLister for FakeLister {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ListError> {
        self.check(ResourceKind::Namespace)?;
        Ok(self.namespaces.clone())
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, ListError> {
        self.check(ResourceKind::Node)?;
        Ok(self.nodes.clone())
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>, ListError> {
        self.check(ResourceKind::Pod)?;
        Ok(self
            .pods
            .iter()
            .filter(|pod| selected(namespace, &pod.metadata))
            .cloned()
            .collect())
    }

    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<Service>, ListError> {
        self.check(ResourceKind::Service)?;
        Ok(self
            .services
            .iter()
            .filter(|service| selected(namespace, &service.metadata))
            .cloned()
            .collect())
    }

    async fn list_hpas(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<HorizontalPodAutoscaler>, ListError> {
        self.check(ResourceKind::Hpa)?;
        Ok(self
            .hpas
            .iter()
            .filter(|hpa| selected(namespace, &hpa.metadata))
            .cloned()
            .collect())
    }
}

fn metadata(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        uid: Some(format!("uid-{name}")),
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

fn resource_map(cpu: &str, memory: &str) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("cpu".to_string(), Quantity(cpu.to_string())),
        ("memory".to_string(), Quantity(memory.to_string())),
    ])
}

fn namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn node(name: &str, cpu: &str, memory: &str) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        status: Some(NodeStatus {
            capacity: Some(resource_map(cpu, memory)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn app_container(cpu_request: &str, memory_request: &str) -> Container {
    Container {
        name: "app".to_string(),
        resources: Some(ResourceRequirements {
            requests: Some(resource_map(cpu_request, memory_request)),
            limits: Some(resource_map("500m", "256Mi")),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn pod(namespace: &str, name: &str, containers: Vec<Container>) -> Pod {
    Pod {
        metadata: metadata(namespace, name),
        spec: Some(PodSpec {
            node_name: Some("node-1".to_string()),
            containers,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn cpu_hpa(
    namespace_name: &str,
    name: &str,
    max_replicas: i32,
    utilization: i32,
) -> HorizontalPodAutoscaler {
    HorizontalPodAutoscaler {
        metadata: metadata(namespace_name, name),
        spec: Some(HorizontalPodAutoscalerSpec {
            scale_target_ref: CrossVersionObjectReference {
                kind: "Deployment".to_string(),
                name: "web".to_string(),
                ..Default::default()
            },
            max_replicas,
            min_replicas: None,
            metrics: Some(vec![MetricSpec {
                type_: "Resource".to_string(),
                resource: Some(ResourceMetricSource {
                    name: "cpu".to_string(),
                    target: MetricTarget {
                        type_: "Utilization".to_string(),
                        average_utilization: Some(utilization),
                        ..Default::default()
                    },
                }),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        status: Some(HorizontalPodAutoscalerStatus::default()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_node_capacity_is_normalized() {
    let collector = Collector::new(FakeLister {
        nodes: vec![node("node-1", "2", "4Gi")],
        ..Default::default()
    });

    let nodes = collector.get_nodes().await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "node-1");
    assert_eq!(nodes[0].cpu_millis, 2000);
    assert_eq!(nodes[0].memory_bytes, 4_294_967_296);
}

#[tokio::test]
async fn test_hpa_defaults_for_sparse_spec() {
    let collector = Collector::new(FakeLister {
        hpas: vec![cpu_hpa("prod", "web-hpa", 5, 80)],
        ..Default::default()
    });

    let hpas = collector.get_hpas().await.unwrap();
    assert_eq!(hpas.len(), 1);
    let hpa = &hpas[0];
    assert_eq!(hpa.target_kind, "Deployment");
    assert_eq!(hpa.target_name, "web");
    assert_eq!(hpa.min_replicas, 1);
    assert_eq!(hpa.max_replicas, 5);
    assert_eq!(hpa.target_cpu_utilization, 80);
    assert_eq!(hpa.target_memory_utilization, 0);
    assert_eq!(hpa.current_replicas, 0);
    assert_eq!(hpa.desired_replicas, 0);
}

#[tokio::test]
async fn test_pod_without_containers_reports_zero_resources() {
    let collector = Collector::new(FakeLister {
        pods: vec![pod("default", "idle", vec![])],
        ..Default::default()
    });

    let pods = collector.get_pods().await.unwrap();
    assert_eq!(pods.len(), 1);
    let record = &pods[0];
    assert_eq!(record.uid, "uid-idle");
    assert_eq!(record.name, "idle");
    assert_eq!(record.namespace, "default");
    assert_eq!(record.node_name, "node-1");
    assert_eq!(record.cpu_request_millis, 0);
    assert_eq!(record.cpu_limit_millis, 0);
    assert_eq!(record.memory_request_bytes, 0);
    assert_eq!(record.memory_limit_bytes, 0);
}

#[tokio::test]
async fn test_pod_resources_follow_first_container() {
    let pods = vec![pod(
        "prod",
        "web-1",
        vec![app_container("250m", "128Mi"), app_container("4", "8Gi")],
    )];
    let collector = Collector::new(FakeLister {
        pods,
        ..Default::default()
    });

    let records = collector.get_pods().await.unwrap();
    assert_eq!(records[0].cpu_request_millis, 250);
    assert_eq!(records[0].memory_request_bytes, 134_217_728);
    assert_eq!(records[0].cpu_limit_millis, 500);
    assert_eq!(records[0].memory_limit_bytes, 268_435_456);
}

#[tokio::test]
async fn test_namespace_scoping_matches_server_filtering() {
    let pods = vec![
        pod("prod", "web-1", vec![app_container("100m", "64Mi")]),
        pod("dev", "web-2", vec![app_container("100m", "64Mi")]),
        pod("prod", "web-3", vec![]),
    ];
    let collector = Collector::new(FakeLister {
        pods,
        ..Default::default()
    });

    let all = collector.get_pods().await.unwrap();
    let prod = collector.get_pods_by_namespace("prod").await.unwrap();
    let expected: Vec<_> = all
        .iter()
        .filter(|pod| pod.namespace == "prod")
        .cloned()
        .collect();
    assert_eq!(prod, expected);
    assert_eq!(prod.len(), 2);

    // The empty string selects all namespaces
    let unscoped = collector.get_pods_by_namespace("").await.unwrap();
    assert_eq!(unscoped, all);
}

#[tokio::test]
async fn test_records_keep_listing_order() {
    let collector = Collector::new(FakeLister {
        namespaces: vec![namespace("zeta"), namespace("alpha"), namespace("midway")],
        ..Default::default()
    });

    let names: Vec<_> = collector
        .get_namespaces()
        .await
        .unwrap()
        .into_iter()
        .map(|ns| ns.name)
        .collect();
    assert_eq!(names, ["zeta", "alpha", "midway"]);
}

#[tokio::test]
async fn test_repeated_collection_is_stable() {
    let collector = Collector::new(FakeLister {
        nodes: vec![node("node-1", "8", "16Gi")],
        hpas: vec![cpu_hpa("prod", "web-hpa", 10, 70)],
        ..Default::default()
    });

    assert_eq!(
        collector.get_nodes().await.unwrap(),
        collector.get_nodes().await.unwrap()
    );
    assert_eq!(
        collector.get_hpas().await.unwrap(),
        collector.get_hpas().await.unwrap()
    );
}

#[tokio::test]
async fn test_service_mapping_through_collector() {
    let service = Service {
        metadata: metadata("prod", "web"),
        spec: Some(ServiceSpec {
            type_: Some("LoadBalancer".to_string()),
            cluster_ip: Some("10.0.0.9".to_string()),
            selector: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                port: 80,
                target_port: Some(IntOrString::Int(8080)),
                protocol: Some("TCP".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };
    let collector = Collector::new(FakeLister {
        services: vec![service],
        ..Default::default()
    });

    let services = collector.get_services().await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].service_type, ServiceType::LoadBalancer);
    assert_eq!(services[0].cluster_ip, "10.0.0.9");
    assert_eq!(services[0].ports[0].protocol, PortProtocol::Tcp);
    assert_eq!(services[0].ports[0].target_port, 8080);

    let scoped = collector.get_services_by_namespace("dev").await.unwrap();
    assert!(scoped.is_empty());
}

#[tokio::test]
async fn test_hpa_scoping_by_namespace() {
    let collector = Collector::new(FakeLister {
        hpas: vec![
            cpu_hpa("prod", "web-hpa", 5, 80),
            cpu_hpa("dev", "api-hpa", 3, 60),
        ],
        ..Default::default()
    });

    let prod = collector.get_hpas_by_namespace("prod").await.unwrap();
    assert_eq!(prod.len(), 1);
    assert_eq!(prod[0].name, "web-hpa");
}

#[tokio::test]
async fn test_listing_failure_names_the_kind() {
    let collector = Collector::new(FakeLister {
        namespaces: vec![namespace("prod")],
        fail: Some(ResourceKind::Pod),
        ..Default::default()
    });

    let err = collector.get_pods().await.unwrap_err();
    assert_eq!(err.kind(), ResourceKind::Pod);
    assert_eq!(err.to_string(), "failed to list pods");

    // Other kinds are unaffected by the pod failure
    let namespaces = collector.get_namespaces().await.unwrap();
    assert_eq!(namespaces.len(), 1);
}
