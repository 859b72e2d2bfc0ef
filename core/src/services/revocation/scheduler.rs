//! Background purge of the revocation ledger.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tg_shared::config::cleanup::{CleanupConfig, DEFAULT_CLEANUP_INTERVAL_SECONDS};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::domain::entities::revocation::PurgeReport;
use crate::errors::DomainResult;
use crate::repositories::RevocationRepository;

use super::ledger::RevocationLedger;

/// Configuration for the revocation scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Whether the background task is started at all
    pub enabled: bool,
    /// Time between purges
    pub interval: Duration,
    /// Purge immediately on start instead of after the first interval
    pub run_on_start: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECONDS),
            run_on_start: false,
        }
    }
}

impl From<&CleanupConfig> for SchedulerConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            enabled: config.enabled,
            interval: Duration::from_secs(config.interval_seconds),
            run_on_start: config.run_on_start,
        }
    }
}

/// Runs `purge_expired` on a fixed cadence.
///
/// At most one purge runs at a time per scheduler. A run requested while
/// another is in flight is skipped and reported as such.
pub struct RevocationScheduler<R: RevocationRepository + ?Sized> {
    ledger: Arc<RevocationLedger<R>>,
    config: SchedulerConfig,
    running: AtomicBool,
}

/// Clears the in-flight flag when a run ends, including on error
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: RevocationRepository + ?Sized> RevocationScheduler<R> {
    pub fn new(ledger: Arc<RevocationLedger<R>>, config: SchedulerConfig) -> Self {
        Self {
            ledger,
            config,
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run a single purge now
    pub async fn run_once(&self) -> DomainResult<PurgeReport> {
        self.run_once_at(Utc::now()).await
    }

    /// Run a single purge with `now` as the cut-off
    pub async fn run_once_at(&self, now: DateTime<Utc>) -> DomainResult<PurgeReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Revocation purge already in progress, skipping");
            return Ok(PurgeReport {
                deleted: 0,
                ran_at: now,
                skipped: true,
            });
        }
        let _guard = RunGuard(&self.running);

        let deleted = self.ledger.purge_expired(now).await?;

        Ok(PurgeReport {
            deleted,
            ran_at: now,
            skipped: false,
        })
    }
}

impl<R: RevocationRepository + ?Sized + 'static> RevocationScheduler<R> {
    /// Spawn the recurring purge task
    ///
    /// Returns `None` when the scheduler is disabled. A failed purge is logged
    /// and retried on the next tick.
    pub fn start(self: Arc<Self>) -> Option<SchedulerHandle> {
        if !self.config.enabled {
            warn!("Revocation cleanup scheduler is disabled");
            return None;
        }
        if self.config.interval.is_zero() {
            error!("Revocation cleanup interval is zero, scheduler not started");
            return None;
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = self.config.interval;
        let first = if self.config.run_on_start {
            Instant::now()
        } else {
            match Instant::now().checked_add(period) {
                Some(first) => first,
                None => {
                    error!("Revocation cleanup interval is out of range, scheduler not started");
                    return None;
                }
            }
        };

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = period.as_secs(),
                run_on_start = self.config.run_on_start,
                "Revocation cleanup scheduler started"
            );

            let mut ticker = tokio::time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.run_once().await {
                            Ok(report) if report.skipped => {}
                            Ok(report) => {
                                info!(deleted = report.deleted, "Scheduled revocation purge finished");
                            }
                            Err(e) => {
                                error!("Scheduled revocation purge failed: {}", e);
                            }
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Revocation cleanup scheduler stopped");
        });

        Some(SchedulerHandle { stop_tx, task })
    }
}

/// Handle to a running scheduler task
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the task to stop after any in-flight purge and wait for it
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Revocation cleanup scheduler task failed: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
