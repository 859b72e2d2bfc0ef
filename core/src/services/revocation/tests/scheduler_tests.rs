//! Unit tests for the revocation scheduler

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::domain::entities::revocation::{Fingerprint, RevocationRecord};
use crate::errors::DomainResult;
use crate::repositories::{
    FailingRevocationRepository, InMemoryRevocationRepository, RevocationRepository,
};
use crate::services::revocation::{RevocationLedger, RevocationScheduler, SchedulerConfig};

/// Blocks inside `delete_expired` until released
struct GatedRepository {
    inner: InMemoryRevocationRepository,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl RevocationRepository for GatedRepository {
    async fn insert(&self, record: RevocationRecord) -> DomainResult<bool> {
        self.inner.insert(record).await
    }

    async fn exists(&self, fingerprint: &Fingerprint) -> DomainResult<bool> {
        self.inner.exists(fingerprint).await
    }

    async fn find(&self, fingerprint: &Fingerprint) -> DomainResult<Option<RevocationRecord>> {
        self.inner.find(fingerprint).await
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.delete_expired(now).await
    }

    async fn health_check(&self) -> DomainResult<()> {
        self.inner.health_check().await
    }

    async fn count(&self) -> DomainResult<usize> {
        self.inner.count().await
    }
}

fn config(interval: Duration, run_on_start: bool) -> SchedulerConfig {
    SchedulerConfig {
        enabled: true,
        interval,
        run_on_start,
    }
}

async fn seeded_repo(expired: usize, live: usize) -> Arc<InMemoryRevocationRepository> {
    let repo = Arc::new(InMemoryRevocationRepository::new());
    let now = Utc::now();
    for i in 0..expired {
        let fp = Fingerprint::of_token(&format!("expired.{}", i));
        repo.insert(RevocationRecord::new(fp, now - ChronoDuration::hours(1)))
            .await
            .unwrap();
    }
    for i in 0..live {
        let fp = Fingerprint::of_token(&format!("live.{}", i));
        repo.insert(RevocationRecord::new(fp, now + ChronoDuration::days(1)))
            .await
            .unwrap();
    }
    repo
}

fn scheduler_for<R: RevocationRepository + ?Sized>(
    repo: Arc<R>,
    config: SchedulerConfig,
) -> Arc<RevocationScheduler<R>> {
    Arc::new(RevocationScheduler::new(
        Arc::new(RevocationLedger::new(repo)),
        config,
    ))
}

#[tokio::test]
async fn test_run_once_reports_deleted() {
    let repo = seeded_repo(3, 2).await;
    let scheduler = scheduler_for(repo.clone(), SchedulerConfig::default());

    let report = scheduler.run_once().await.unwrap();
    assert_eq!(report.deleted, 3);
    assert!(!report.skipped);
    assert_eq!(repo.count().await.unwrap(), 2);

    let again = scheduler.run_once().await.unwrap();
    assert_eq!(again.deleted, 0);
}

#[tokio::test]
async fn test_overlapping_run_is_skipped() {
    let repo = Arc::new(GatedRepository {
        inner: InMemoryRevocationRepository::new(),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let scheduler = scheduler_for(repo.clone(), SchedulerConfig::default());

    let first = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run_once().await })
    };
    repo.entered.notified().await;
    assert!(scheduler.is_running());

    let second = scheduler.run_once().await.unwrap();
    assert!(second.skipped);
    assert_eq!(second.deleted, 0);

    repo.release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert!(!first.skipped);
    assert!(!scheduler.is_running());
}

#[tokio::test]
async fn test_failed_run_releases_guard() {
    let scheduler = scheduler_for(
        Arc::new(FailingRevocationRepository::new()),
        SchedulerConfig::default(),
    );

    assert!(scheduler.run_once().await.is_err());
    assert!(!scheduler.is_running());
    assert!(scheduler.run_once().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_run_on_start_purges_immediately() {
    let repo = seeded_repo(2, 1).await;
    let scheduler = scheduler_for(repo.clone(), config(Duration::from_secs(86_400), true));

    let handle = scheduler.start().unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(repo.count().await.unwrap(), 1);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_first_purge_waits_one_interval() {
    let repo = seeded_repo(2, 0).await;
    let scheduler = scheduler_for(repo.clone(), config(Duration::from_secs(86_400), false));

    let handle = scheduler.start().unwrap();

    tokio::time::sleep(Duration::from_secs(3_600)).await;
    assert_eq!(repo.count().await.unwrap(), 2);

    tokio::time::sleep(Duration::from_secs(86_400)).await;
    assert_eq!(repo.count().await.unwrap(), 0);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_purge_repeats_every_interval() {
    let repo = seeded_repo(1, 0).await;
    let scheduler = scheduler_for(repo.clone(), config(Duration::from_secs(60), true));

    let handle = scheduler.start().unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(repo.count().await.unwrap(), 0);

    let fp = Fingerprint::of_token("late.revocation");
    repo.insert(RevocationRecord::new(fp.clone(), Utc::now() - ChronoDuration::seconds(1)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(!repo.exists(&fp).await.unwrap());

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_task() {
    let repo = seeded_repo(0, 0).await;
    let scheduler = scheduler_for(repo, config(Duration::from_secs(60), false));

    let handle = scheduler.start().unwrap();
    assert!(!handle.is_finished());

    tokio::time::timeout(Duration::from_secs(5), handle.stop())
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_survives_failures() {
    let scheduler = scheduler_for(
        Arc::new(FailingRevocationRepository::new()),
        config(Duration::from_secs(60), true),
    );

    let handle = scheduler.start().unwrap();
    tokio::time::sleep(Duration::from_secs(185)).await;
    assert!(!handle.is_finished());

    handle.stop().await;
}

#[tokio::test]
async fn test_disabled_scheduler_does_not_start() {
    let scheduler = scheduler_for(
        Arc::new(InMemoryRevocationRepository::new()),
        SchedulerConfig {
            enabled: false,
            ..SchedulerConfig::default()
        },
    );
    assert!(scheduler.start().is_none());
}

#[tokio::test]
async fn test_zero_interval_does_not_start() {
    let scheduler = scheduler_for(
        Arc::new(InMemoryRevocationRepository::new()),
        SchedulerConfig {
            interval: Duration::ZERO,
            ..SchedulerConfig::default()
        },
    );
    assert!(scheduler.start().is_none());
}

#[tokio::test]
async fn test_out_of_range_interval_does_not_start() {
    let scheduler = scheduler_for(
        Arc::new(InMemoryRevocationRepository::new()),
        SchedulerConfig {
            interval: Duration::MAX,
            ..SchedulerConfig::default()
        },
    );
    assert!(scheduler.start().is_none());
}

#[test]
fn test_config_from_cleanup_config() {
    let cleanup = tg_shared::CleanupConfig {
        enabled: true,
        interval_seconds: 3_600,
        run_on_start: true,
    };
    let config = SchedulerConfig::from(&cleanup);

    assert!(config.enabled);
    assert!(config.run_on_start);
    assert_eq!(config.interval, Duration::from_secs(3_600));
    assert_eq!(SchedulerConfig::default().interval, Duration::from_secs(86_400));
}
