//! zkmeta - ZooKeeper metadata lifecycle management for BookKeeper clusters

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zkmeta::env::WATCH_NAMESPACE_ENV;
use zkmeta::lifecycle::{create_znode, delete_all_znodes, update_znode};
use zkmeta::DEFAULT_ZOOKEEPER_URI;

/// zkmeta - manage a BookKeeper cluster's znode subtree
#[derive(Parser, Debug)]
#[command(name = "zkmeta", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments identifying the target cluster and its ZooKeeper ensemble
#[derive(Args, Debug)]
struct ClusterArgs {
    /// ZooKeeper entry point as host[:port]
    ///
    /// A bare service name is expanded to its in-cluster DNS form; an IPv4
    /// literal is used verbatim.
    #[arg(long, env = "ZOOKEEPER_URI", default_value = DEFAULT_ZOOKEEPER_URI)]
    uri: String,

    /// Namespace used to expand bare service names
    #[arg(long, short = 'n', env = WATCH_NAMESPACE_ENV)]
    namespace: String,

    /// BookKeeper cluster name, embedded verbatim into znode paths
    #[arg(long)]
    name: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ensure the configuration znode exists with the given replica count
    ///
    /// An already-present node is left untouched, so this is safe to run
    /// repeatedly.
    Create {
        #[command(flatten)]
        cluster: ClusterArgs,

        /// Number of bookies in the cluster
        #[arg(long)]
        replicas: i32,
    },

    /// Assign a new replica count to an existing configuration znode
    ///
    /// A missing node is a no-op; this never creates one.
    Update {
        #[command(flatten)]
        cluster: ClusterArgs,

        /// Number of bookies in the cluster
        #[arg(long)]
        replicas: i32,
    },

    /// Delete the cluster's entire znode subtree, root included
    DeleteAll {
        #[command(flatten)]
        cluster: ClusterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create { cluster, replicas } => {
            create_znode(&cluster.uri, &cluster.namespace, &cluster.name, replicas).await?
        }
        Commands::Update { cluster, replicas } => {
            update_znode(&cluster.uri, &cluster.namespace, &cluster.name, replicas).await?
        }
        Commands::DeleteAll { cluster } => {
            delete_all_znodes(&cluster.uri, &cluster.namespace, &cluster.name).await?
        }
    }

    Ok(())
}
