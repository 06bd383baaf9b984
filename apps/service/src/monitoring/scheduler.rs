use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::checker::Prober;
use super::types::{CycleReport, LoopState};
use crate::database::TargetStore;

/// Reconciliation loop - the only writer of target availability.
///
/// Each cycle lists every target, probes them one after another and writes
/// back only the values that changed. Between cycles it sleeps for
/// `interval`. Cancellation is observed before each probe, during a probe and
/// during the sleep.
pub struct Reconciler {
    store: Arc<dyn TargetStore>,
    prober: Arc<dyn Prober>,
    interval: Duration,
    state_tx: watch::Sender<LoopState>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn TargetStore>, prober: Arc<dyn Prober>, interval: Duration) -> Self {
        // A fresh loop begins with a probing pass.
        let (state_tx, _) = watch::channel(LoopState::Probing);
        Self { store, prober, interval, state_tx }
    }

    /// Subscribe to loop state changes
    pub fn state(&self) -> watch::Receiver<LoopState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: LoopState) {
        debug!(%state, "Reconciliation loop state change");
        self.state_tx.send_replace(state);
    }

    /// Run one reconciliation cycle.
    ///
    /// Store failures are logged and skipped; this never fails.
    pub async fn run_cycle(&self, token: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();

        let targets = match self.store.list_all().await {
            Ok(targets) => targets,
            Err(e) => {
                warn!(error = %e, "Failed to list targets, skipping cycle");
                report.listing_failed = true;
                return report;
            }
        };
        report.targets = targets.len();

        for target in targets {
            if token.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let reachable = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    report.cancelled = true;
                    break;
                }
                reachable = self.prober.probe(&target.ip, target.port) => reachable,
            };
            report.probed += 1;

            if reachable == target.available {
                continue;
            }

            match self.store.update_availability(target.id, reachable).await {
                Ok(()) => {
                    report.changed += 1;
                    info!(
                        id = target.id,
                        ip = %target.ip,
                        port = target.port,
                        from = target.available,
                        to = reachable,
                        "Target availability changed"
                    );
                }
                Err(e) => {
                    report.failed_updates += 1;
                    warn!(
                        id = target.id,
                        ip = %target.ip,
                        port = target.port,
                        error = %e,
                        "Failed to store availability change"
                    );
                }
            }
        }

        if report.changed > 0 || report.failed_updates > 0 {
            info!(
                targets = report.targets,
                probed = report.probed,
                changed = report.changed,
                failed = report.failed_updates,
                "Reconciliation cycle finished"
            );
        } else {
            debug!(targets = report.targets, probed = report.probed, "Reconciliation cycle finished");
        }

        report
    }

    /// Run until `token` is cancelled
    pub async fn run(self, token: CancellationToken) {
        info!(interval_secs = self.interval.as_secs(), "Reconciliation loop started");

        while !token.is_cancelled() {
            self.set_state(LoopState::Probing);
            let report = self.run_cycle(&token).await;
            if report.cancelled {
                break;
            }

            self.set_state(LoopState::Idle);
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        self.set_state(LoopState::Stopped);
        info!("Reconciliation loop stopped");
    }

    /// Start the loop on a background task
    pub fn spawn(self) -> ReconcilerHandle {
        let token = CancellationToken::new();
        let state = self.state();
        let task = tokio::spawn(self.run(token.clone()));

        ReconcilerHandle { token, state, task }
    }
}

/// Handle to a running reconciliation loop
pub struct ReconcilerHandle {
    token: CancellationToken,
    state: watch::Receiver<LoopState>,
    task: JoinHandle<()>,
}

impl ReconcilerHandle {
    pub fn state(&self) -> watch::Receiver<LoopState> {
        self.state.clone()
    }

    /// Cancel the loop and wait until it has actually stopped.
    ///
    /// Callers may release shared store resources once this returns.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            error!("Reconciliation loop task ended abnormally: {}", e);
        }
    }
}
