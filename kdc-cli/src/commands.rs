use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the local k3d cluster (name comes from KDC_CLUSTER_NAME)
    Cluster {
        /// Action to perform: create, delete, start, stop
        action: String,

        /// Treat provisioning-tool output on stderr as a warning instead of
        /// a failure when the command itself exits 0
        #[arg(long)]
        tolerate_stderr: bool,
    },

    /// Manage a namespace inside the cluster
    Namespace {
        /// Namespace to manage
        name: String,

        /// Action to perform: create, delete, reset
        action: String,
    },
}
