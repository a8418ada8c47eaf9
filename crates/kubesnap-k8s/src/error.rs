use std::error::Error as StdError;

use thiserror::Error;

use kubesnap_types::ResourceKind;

/// Failure to retrieve one resource kind from the cluster.
///
/// The message names the kind that failed; the underlying cause is kept
/// unchanged as the error source.
#[derive(Debug, Error)]
#[error("failed to list {kind}")]
pub struct ListError {
    kind: ResourceKind,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl ListError {
    pub fn new(kind: ResourceKind, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// The resource kind whose listing failed
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}
