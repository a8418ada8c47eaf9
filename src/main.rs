use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use kubesnap_k8s::{Collector, KubeLister, connect};

mod output;

use output::OutputFormat;

/// Kubesnap - a normalized snapshot of Kubernetes cluster resources
#[derive(Parser, Debug)]
#[command(name = "kubesnap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a kubeconfig file (defaults to the standard locations)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long, value_name = "CONTEXT")]
    context: Option<String>,

    /// Collect namespaced resources from this namespace only
    #[arg(long, short = 'n', value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "json")]
    output: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run_app(args: Args) -> Result<()> {
    let client = connect(args.kubeconfig.as_deref(), args.context.as_deref()).await?;
    let collector = Collector::new(KubeLister::new(client));

    // Collect sequentially and stop at the first failure
    let namespaces = collector.get_namespaces().await?;
    let nodes = collector.get_nodes().await?;
    let (pods, services, hpas) = match args.namespace.as_deref() {
        Some(namespace) => (
            collector.get_pods_by_namespace(namespace).await?,
            collector.get_services_by_namespace(namespace).await?,
            collector.get_hpas_by_namespace(namespace).await?,
        ),
        None => (
            collector.get_pods().await?,
            collector.get_services().await?,
            collector.get_hpas().await?,
        ),
    };

    output::print_snapshot(&namespaces, &nodes, &pods, &services, &hpas, args.output)
}
