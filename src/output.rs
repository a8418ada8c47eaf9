//! Output formatting for collected snapshots.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use kubesnap_types::{HpaRecord, NamespaceRecord, NodeRecord, PodRecord, ServiceRecord};

/// How records are written to stdout
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, one document per record
    Json,
    /// One line per record
    Summary,
}

/// Print all five sections in collection order.
pub fn print_snapshot(
    namespaces: &[NamespaceRecord],
    nodes: &[NodeRecord],
    pods: &[PodRecord],
    services: &[ServiceRecord],
    hpas: &[HpaRecord],
    format: OutputFormat,
) -> Result<()> {
    print_section("Namespaces", namespaces, format, |record| {
        record.name.clone()
    })?;

    print_section("Nodes", nodes, format, |record| {
        format!(
            "{}  cpu={}  memory={}",
            record.name,
            format_cpu(record.cpu_millis),
            format_bytes(record.memory_bytes)
        )
    })?;

    print_section("Pods", pods, format, |record| {
        format!(
            "{}/{}  node={}  cpu={}/{}  memory={}/{}",
            record.namespace,
            record.name,
            record.node_name,
            format_cpu(record.cpu_request_millis),
            format_cpu(record.cpu_limit_millis),
            format_bytes(record.memory_request_bytes),
            format_bytes(record.memory_limit_bytes)
        )
    })?;

    print_section("Services", services, format, |record| {
        format!(
            "{}/{}  {}  {}  {} port(s)",
            record.namespace,
            record.name,
            record.service_type.as_str(),
            record.cluster_ip,
            record.ports.len()
        )
    })?;

    print_section("HPAs", hpas, format, |record| {
        format!(
            "{}/{}  {}/{}  replicas={}-{}  cpu={}%  current={}",
            record.namespace,
            record.name,
            record.target_kind,
            record.target_name,
            record.min_replicas,
            record.max_replicas,
            record.target_cpu_utilization,
            record.current_replicas
        )
    })?;

    Ok(())
}

fn print_section<T: Serialize>(
    title: &str,
    records: &[T],
    format: OutputFormat,
    summary: impl Fn(&T) -> String,
) -> Result<()> {
    println!("--------------------------------");
    println!("{title}:");
    match format {
        OutputFormat::Json => {
            for record in records {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
        OutputFormat::Summary => {
            for record in records {
                println!("{}", summary(record));
            }
        }
    }
    Ok(())
}

/// Millicores as "250m" below one core, "2.0 cores" from there up
fn format_cpu(millis: i64) -> String {
    if millis >= 1000 {
        format!("{:.1} cores", millis as f64 / 1000.0)
    } else {
        format!("{millis}m")
    }
}

/// Bytes with a binary suffix
fn format_bytes(bytes: i64) -> String {
    const KI: f64 = 1024.0;
    const MI: f64 = KI * 1024.0;
    const GI: f64 = MI * 1024.0;

    let bytes = bytes as f64;
    if bytes >= GI {
        format!("{:.2}Gi", bytes / GI)
    } else if bytes >= MI {
        format!("{:.2}Mi", bytes / MI)
    } else if bytes >= KI {
        format!("{:.2}Ki", bytes / KI)
    } else {
        format!("{bytes:.0}B")
    }
}
