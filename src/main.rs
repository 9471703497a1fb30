//! Main entry point for the fsprep CLI app

use fsprep::cli::{self, Commands};
use fsprep::hooks::{self, PrepConfig};
use fsprep::mirror;

fn main() -> std::process::ExitCode {
    init_tracing();
    if let Err(e) = run_app() {
        if e.downcast_ref::<clap::Error>().is_none() {
            eprintln!("Error: {}", e);
        }
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::run()?;

    match &command {
        Commands::Mirror { source, dest, policy } => {
            let stats = mirror::mirror(source, dest, &policy.to_policy())?;
            print_summary(&stats);
        }
        Commands::Ensure { dest } => {
            let config = PrepConfig { dest_root: dest.clone(), ..PrepConfig::default() };
            hooks::pre_build(&config)?;
        }
        Commands::Rebuild { source, dest, policy } => {
            let config = PrepConfig {
                source_root: source.clone(),
                dest_root: dest.clone(),
                policy: policy.to_policy(),
            };
            let stats = hooks::pre_upload(&config)?;
            print_summary(&stats);
        }
    }

    Ok(())
}

fn print_summary(stats: &fsprep::mirror::MirrorStats) {
    println!(
        "{} dirs, {} compressed, {} verbatim ({} -> {} bytes)",
        stats.dirs_created,
        stats.files_compressed,
        stats.files_copied,
        stats.bytes_in,
        stats.bytes_out
    );
}
