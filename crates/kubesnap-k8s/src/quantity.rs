//! Field extraction for Kubernetes quantities and autoscaler metric specs.
//!
//! All extractors share one defaulting policy: an absent or malformed value
//! counts as 0.

use k8s_openapi::api::autoscaling::v2::MetricSpec;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1024.0 * 1024.0),
    ("Gi", 1024.0 * 1024.0 * 1024.0),
    ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Pi", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Ei", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

const DECIMAL_SUFFIXES: [(&str, f64); 9] = [
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

/// Parse a quantity string ("250m", "4Gi", "2", "123E6") into its plain
/// numeric value. Exponent notation is tried first, then binary suffixes,
/// then decimal suffixes. Returns None for anything unparseable.
fn parse_quantity(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<f64>() {
        return Some(value).filter(|v| v.is_finite());
    }
    for (suffix, factor) in BINARY_SUFFIXES {
        if let Some(digits) = raw.strip_suffix(suffix) {
            return scaled(digits, factor);
        }
    }
    for (suffix, factor) in DECIMAL_SUFFIXES {
        if let Some(digits) = raw.strip_suffix(suffix) {
            return scaled(digits, factor);
        }
    }
    None
}

fn scaled(digits: &str, factor: f64) -> Option<f64> {
    digits
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * factor)
}

/// CPU quantity in millicores. "2" becomes 2000, "250m" becomes 250.
pub(crate) fn cpu_millis(quantity: Option<&Quantity>) -> i64 {
    match quantity.and_then(|q| parse_quantity(&q.0)) {
        Some(value) => ((value * 1000.0).round() as i64).max(0),
        None => 0,
    }
}

/// Memory quantity in whole bytes. "4Gi" becomes 4294967296.
pub(crate) fn memory_bytes(quantity: Option<&Quantity>) -> i64 {
    match quantity.and_then(|q| parse_quantity(&q.0)) {
        Some(value) => (value.round() as i64).max(0),
        None => 0,
    }
}

/// Average-utilization target for the named resource ("cpu" or "memory").
///
/// Scans the resource metric entries in order. When several entries name the
/// same resource the last one carrying an average utilization wins; entries
/// without one leave earlier values untouched. No match yields 0.
pub(crate) fn utilization_target(metrics: &[MetricSpec], resource: &str) -> i32 {
    let mut target = 0;
    for metric in metrics {
        if let Some(source) = &metric.resource {
            if source.name == resource {
                if let Some(utilization) = source.target.average_utilization {
                    target = utilization;
                }
            }
        }
    }
    target
}
