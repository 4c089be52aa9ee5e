use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "param-verify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check whether an API server's OpenAPI v3 schema accepts a query parameter")]
#[command(long_about = "Reads saved OpenAPI v3 documents of a Kubernetes API server and reports whether a resource's PATCH operation declares a query parameter such as fieldValidation. Custom resources are recognized from CustomResourceDefinition manifests.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format where applicable
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a resource supports a query parameter
    Check {
        /// API version of the resource, e.g. `batch/v1` or `v1`
        #[arg(value_name = "API_VERSION")]
        api_version: String,

        /// Kind of the resource, e.g. `Job`
        #[arg(value_name = "KIND")]
        kind: String,

        /// Directory of saved OpenAPI v3 documents
        #[arg(long, env = "PARAM_VERIFY_SCHEMA_DIR", value_name = "DIR")]
        schema_dir: Option<PathBuf>,

        /// CustomResourceDefinition manifest file (repeatable)
        #[arg(long = "crds", value_name = "FILE")]
        crds: Vec<PathBuf>,

        /// Query parameter to check
        #[arg(long, value_name = "NAME")]
        param: Option<String>,
    },

    /// Show the schema keys and paths computed for a resource
    Resource {
        /// API version of the resource, e.g. `apps/v1`
        #[arg(value_name = "API_VERSION")]
        api_version: String,

        /// Kind of the resource, e.g. `Deployment`
        #[arg(value_name = "KIND")]
        kind: String,
    },

    /// List group versions available in the schema directory
    GroupVersions {
        /// Directory of saved OpenAPI v3 documents
        #[arg(long, env = "PARAM_VERIFY_SCHEMA_DIR", value_name = "DIR")]
        schema_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
