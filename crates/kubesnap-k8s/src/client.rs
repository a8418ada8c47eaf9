//! Cluster connection bootstrap.

use std::path::Path;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};

/// Build an authenticated cluster client.
///
/// An explicit kubeconfig path wins, then a named context resolved from the
/// ambient kubeconfig, then the environment default (KUBECONFIG or the
/// in-cluster service account).
pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<kube::Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_owned),
        ..Default::default()
    };

    let config = match (kubeconfig, context) {
        (Some(path), _) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig at {}", path.display()))?;
            kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .context("Failed to build configuration from kubeconfig")?
        }
        (None, Some(context)) => kube::Config::from_kubeconfig(&options)
            .await
            .with_context(|| format!("Failed to load kubeconfig context '{context}'"))?,
        (None, None) => {
            return kube::Client::try_default()
                .await
                .context("Failed to connect with the default cluster configuration");
        }
    };

    kube::Client::try_from(config).context("Failed to create cluster client")
}
