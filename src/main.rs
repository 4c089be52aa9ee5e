use clap::Parser;
use openapi_param_verifier::{
    cli::{Cli, Commands},
    config,
    handlers::{CheckOptions, handle_check, handle_group_versions, handle_resource},
};
use std::process;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns `false` when the checked parameter is unsupported.
fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            api_version,
            kind,
            schema_dir,
            crds,
            param,
        } => {
            let options = CheckOptions {
                api_version,
                kind,
                schema_dir,
                crds,
                param,
                json: cli.json,
            };
            let (report, output) = handle_check(options, &config)?;
            if !cli.quiet || cli.json {
                println!("{}", output);
            }
            Ok(report.supported)
        }
        Commands::Resource { api_version, kind } => {
            let output = handle_resource(&api_version, &kind, cli.json)?;
            if !cli.quiet || cli.json {
                println!("{}", output);
            }
            Ok(true)
        }
        Commands::GroupVersions { schema_dir } => {
            let output = handle_group_versions(schema_dir, &config, cli.json)?;
            if !cli.quiet || cli.json {
                println!("{}", output);
            }
            Ok(true)
        }
    }
}
