use crate::parse;
use crate::probe::Probe;
use crate::types::{RunReport, ScanConfig, ServiceRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

/// Counters and records shared across workers while a run is in flight.
#[derive(Clone, Debug, Default)]
struct SharedReport {
    targets_failed: Arc<AtomicU64>,
    services: Arc<Mutex<Vec<ServiceRecord>>>,
}

/// Fan out one worker task per target through a fixed-size pool and
/// wait for all of them to finish.
///
/// - Pool capacity is `cfg.max_workers`, enforced with a `Semaphore`;
///   permits are acquired before spawning so targets enter the pool in
///   file order and are picked up by whichever worker frees up first.
/// - Each worker runs both stages to completion; there is no
///   cancellation and no timeout at this layer.
/// - A target's failure only affects that target. Workers print their
///   own progress and errors, so console lines from different targets
///   may interleave.
pub async fn run_targets(
    probe: Arc<dyn Probe>,
    targets: Vec<String>,
    cfg: &ScanConfig,
) -> RunReport {
    let total = targets.len() as u64;
    let shared = SharedReport::default();

    let sem = Arc::new(Semaphore::new(cfg.max_workers.max(1)));
    let mut set = JoinSet::new();

    for target in targets {
        let permit = sem
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore in scope");
        let probe = probe.clone();
        let shared = shared.clone();
        let top_ports = cfg.top_ports;

        set.spawn(async move {
            let _permit = permit; // keep permit until the target is done

            process_target(probe.as_ref(), &target, top_ports, &shared).await;
        });
    }

    while let Some(_res) = set.join_next().await {}

    let services = shared.services.lock().await.clone();
    RunReport {
        targets_total: total,
        targets_failed: shared.targets_failed.load(Ordering::Relaxed),
        services,
    }
}

/// Sequential two-stage processing of a single target.
///
/// Stage 2 runs only when stage 1 succeeded and found at least one open
/// port, and is restricted to exactly the ports stage 1 reported, in
/// the order it reported them.
async fn process_target(probe: &dyn Probe, target: &str, top_ports: u32, shared: &SharedReport) {
    if top_ports == 0 {
        println!("Scanning {target} across the full port range...");
    } else {
        println!("Scanning {target} for the top {top_ports} ports...");
    }

    let open_ports = match probe.discover(target).await {
        Ok(stdout) => parse::extract_open_ports(&stdout),
        Err(e) => {
            eprintln!("{e}");
            shared.targets_failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    if open_ports.is_empty() {
        println!("No open ports found on {target}.");
        return;
    }

    println!("Open ports on {target}: {}", open_ports.join(", "));
    println!("Getting service information for {target}...");

    match probe.identify(target, &open_ports).await {
        Ok(stdout) => {
            for (port, service) in parse::extract_services(&stdout) {
                println!("{target}:{port} {service}");
                let record = ServiceRecord {
                    target: target.to_string(),
                    port,
                    service,
                };
                let mut guard = shared.services.lock().await;
                guard.push(record);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            shared.targets_failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}
