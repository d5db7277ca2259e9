use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use proxyscan_rs::probe::ProxychainsNmap;
use proxyscan_rs::runner;
use proxyscan_rs::targets;
use proxyscan_rs::types::{RunReport, ScanConfig};

use anyhow::Result;
use clap::Parser;

/// proxyscan-rs — scan open ports and services for a list of targets through proxychains+nmap.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "proxyscan-rs",
    version,
    about = "Scan open ports and identify services for a list of targets through proxychains and nmap.",
    long_about = None
)]
struct Cli {
    /// Path to the file containing the list of target IPs/hostnames, one per line.
    ip_list_file: PathBuf,

    /// Number of most common ports to scan. Use 0 to scan all ports.
    #[arg(default_value_t = 10)]
    top_ports: u32,

    /// Path to the proxychains configuration file.
    #[arg(default_value = "/etc/proxychains.conf")]
    proxychains_config: PathBuf,

    /// Maximum number of targets scanned in parallel.
    #[arg(long, default_value_t = 5)]
    threads: usize,

    /// Write discovered services as pretty JSON to this path (optional).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("proxyscan-rs configuration:");
    println!("  targets file : {}", cli.ip_list_file.display());
    println!(
        "  top ports    : {}",
        if cli.top_ports == 0 {
            "<all 1-65535>".to_string()
        } else {
            cli.top_ports.to_string()
        }
    );
    println!("  proxychains  : {}", cli.proxychains_config.display());
    println!("  threads      : {}", cli.threads);
    println!(
        "  output       : {}",
        cli.output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );

    // Scan failures never flip the exit code; neither does a missing or
    // unreadable target list. The message is the whole contract.
    let target_list = match targets::load_targets_from_path(&cli.ip_list_file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    let cfg = ScanConfig {
        proxychains_config: cli.proxychains_config,
        top_ports: cli.top_ports,
        max_workers: cli.threads,
    };

    let probe = Arc::new(ProxychainsNmap::new(
        cfg.proxychains_config.clone(),
        cfg.top_ports,
    ));
    let report = runner::run_targets(probe, target_list, &cfg).await;

    println!(
        "\nDone: {} targets, {} failed, {} services identified.",
        report.targets_total,
        report.targets_failed,
        report.services.len()
    );

    if let Some(path) = cli.output.as_deref() {
        if let Err(e) = write_report_json(path, &report) {
            eprintln!("Failed to write JSON to {}: {}", path.display(), e);
        } else {
            println!("Wrote JSON report to {}", path.display());
        }
    }

    Ok(())
}

fn write_report_json(path: &std::path::Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
