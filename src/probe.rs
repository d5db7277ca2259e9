//! External process invocation for the two scan stages.
//!
//! Both stages shell out to the scanner through the proxy wrapper, so
//! every probe connection is routed over the configured chain. The
//! [`Probe`] trait is the seam between the runner and the real
//! binaries; tests substitute an implementation returning canned text.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Proxy wrapper binary, resolved via `PATH`.
pub const PROXY_WRAPPER: &str = "proxychains";
/// Scanner binary invoked under the wrapper.
pub const SCANNER: &str = "nmap";

/// Two-stage probe of a single target: port discovery, then service
/// detection on the discovered ports.
///
/// Each method runs one external process to completion and returns its
/// captured stdout; a non-zero exit becomes a stage-specific error
/// carrying the captured stderr. No retries, no timeouts beyond what
/// the scanner's own timing template enforces.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Stage 1: scan `target` for open ports.
    async fn discover(&self, target: &str) -> Result<String>;

    /// Stage 2: identify services on `ports` (discovery order preserved).
    async fn identify(&self, target: &str, ports: &[String]) -> Result<String>;
}

/// The real probe: proxychains-wrapped nmap.
pub struct ProxychainsNmap {
    proxychains_config: PathBuf,
    top_ports: u32,
}

impl ProxychainsNmap {
    pub fn new(proxychains_config: impl Into<PathBuf>, top_ports: u32) -> Self {
        Self {
            proxychains_config: proxychains_config.into(),
            top_ports,
        }
    }

    async fn run_wrapper(&self, args: &[String]) -> Result<std::process::Output> {
        Command::new(PROXY_WRAPPER)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Spawn {
                tool: PROXY_WRAPPER.to_string(),
                source: e,
            })
    }
}

/// Argument vector for the discovery stage, everything after the
/// wrapper binary itself.
///
/// `top_ports == 0` requests a full 1-65535 sweep (`-p-`); otherwise
/// the N most common ports (`--top-ports N`). `-sT` keeps the scan on
/// full TCP connects so it survives the proxy chain, `-Pn` skips host
/// discovery pings that would not traverse it anyway.
pub fn discovery_args(config: &Path, top_ports: u32, target: &str) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        config.display().to_string(),
        SCANNER.to_string(),
        "-sT".to_string(),
    ];
    if top_ports == 0 {
        args.push("-p-".to_string());
    } else {
        args.push("--top-ports".to_string());
        args.push(top_ports.to_string());
    }
    args.push("-Pn".to_string());
    args.push("-T4".to_string());
    args.push(target.to_string());
    args
}

/// Argument vector for the service-detection stage, restricted to
/// exactly the given ports (comma-joined, in the order given).
pub fn service_args(config: &Path, ports: &[String], target: &str) -> Vec<String> {
    vec![
        "-f".to_string(),
        config.display().to_string(),
        SCANNER.to_string(),
        "-sV".to_string(),
        "-sT".to_string(),
        "-p".to_string(),
        ports.join(","),
        "-Pn".to_string(),
        "-T4".to_string(),
        target.to_string(),
    ]
}

#[async_trait]
impl Probe for ProxychainsNmap {
    async fn discover(&self, target: &str) -> Result<String> {
        let args = discovery_args(&self.proxychains_config, self.top_ports, target);
        let output = self.run_wrapper(&args).await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::DiscoveryFailed {
                target: target.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    async fn identify(&self, target: &str, ports: &[String]) -> Result<String> {
        let args = service_args(&self.proxychains_config, ports, target);
        let output = self.run_wrapper(&args).await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::ServiceFailed {
                target: target.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_uses_top_ports_when_positive() {
        let args = discovery_args(Path::new("/etc/proxychains.conf"), 10, "10.0.0.1");
        assert_eq!(
            args,
            vec![
                "-f",
                "/etc/proxychains.conf",
                "nmap",
                "-sT",
                "--top-ports",
                "10",
                "-Pn",
                "-T4",
                "10.0.0.1",
            ]
        );
    }

    #[test]
    fn discovery_sweeps_all_ports_when_zero() {
        let args = discovery_args(Path::new("/etc/proxychains.conf"), 0, "10.0.0.1");
        assert!(args.contains(&"-p-".to_string()));
        assert!(!args.contains(&"--top-ports".to_string()));
    }

    #[test]
    fn service_args_join_ports_in_order() {
        let ports = vec!["443".to_string(), "22".to_string(), "80".to_string()];
        let args = service_args(Path::new("/tmp/pc.conf"), &ports, "host.example");
        assert_eq!(
            args,
            vec![
                "-f",
                "/tmp/pc.conf",
                "nmap",
                "-sV",
                "-sT",
                "-p",
                "443,22,80",
                "-Pn",
                "-T4",
                "host.example",
            ]
        );
    }
}
