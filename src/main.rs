use anyhow::Result;
use clap::Parser;
use jobmail_counter::config::Config;
use jobmail_counter::runner;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Count job-application emails across configured Gmail accounts
///
/// Accounts and the query window live in the config file, not in flags;
/// the CLI only selects which file and how chatty the logs are.
#[derive(Parser, Debug)]
#[command(name = "jobmail-counter", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Exit with proper code on error
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        eprintln!("\nFor help, run: jobmail-counter --help");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Install default crypto provider for rustls
    // This is necessary because multiple dependencies use different crypto providers
    // On non-Windows platforms, use aws-lc-rs (better performance, FIPS support)
    // On Windows, use ring (better compatibility, no NASM/CMake required)
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("jobmail_counter=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("jobmail_counter=info,warn,error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load(&cli.config).await?;
    runner::run(&config).await?;

    Ok(())
}
