//! Backlog reconciliation service
//!
//! The missing-ISRC backlog holds codes the catalog knows it lacks. One
//! reconciliation pass walks the whole backlog inside a single transaction:
//! codes that turn out to be stored already are simply dequeued, codes the
//! provider resolves are imported and dequeued, and codes the provider has
//! no match for stay queued for a later pass. A failure anywhere rolls the
//! whole pass back, so the backlog and the catalog never disagree.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db;
use crate::domain::{Isrc, Track};
use crate::error::Result;
use crate::provider::StreamingApi;
use crate::services::track;

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Codes already stored; only dequeued
    pub resolved: usize,
    /// Codes imported from the provider and dequeued
    pub imported: usize,
    /// Codes the provider had no match for; still queued
    pub unresolved: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.resolved + self.imported + self.unresolved
    }
}

/// Service reconciling the backlog against the streaming provider.
pub struct SyncService {
    pool: SqlitePool,
    provider: Arc<dyn StreamingApi>,
}

impl SyncService {
    pub fn new(pool: SqlitePool, provider: Arc<dyn StreamingApi>) -> Self {
        Self { pool, provider }
    }

    /// Work through the whole backlog in one atomic pass.
    ///
    /// Every dequeue, import and join row from the pass commits together;
    /// a provider failure or a malformed queued code aborts the pass and
    /// leaves the backlog untouched.
    pub async fn sync_missing_isrcs(&self) -> Result<SyncReport> {
        let mut tx = self.pool.begin().await?;
        let backlog = db::backlog::get_backlog(&mut tx).await?;
        info!("Reconciling {} queued ISRC(s)", backlog.len());

        let mut report = SyncReport::default();
        for code in backlog {
            let isrc = Isrc::new(&code)?;

            if db::tracks::find_track_id(&mut tx, &isrc).await?.is_some() {
                debug!("ISRC {isrc} already stored, dequeuing");
                db::backlog::delete_backlog_entry(&mut tx, &isrc).await?;
                report.resolved += 1;
                continue;
            }

            match self.provider.search_by_isrc(&isrc).await? {
                Some(found) => {
                    track::persist_track(&mut tx, &found).await?;
                    db::backlog::delete_backlog_entry(&mut tx, &isrc).await?;
                    report.imported += 1;
                }
                None => {
                    warn!("No provider match for ISRC {isrc}, leaving queued");
                    report.unresolved += 1;
                }
            }
        }

        tx.commit().await?;
        info!(
            "Reconciliation finished: {} resolved, {} imported, {} unresolved",
            report.resolved, report.imported, report.unresolved
        );
        Ok(report)
    }

    /// Read-through lookup: the catalog first, then the provider.
    ///
    /// A provider hit is returned as-is, without being written back; use
    /// the backlog when the code should be imported.
    pub async fn sync_isrc(&self, isrc: &Isrc) -> Result<Option<Track>> {
        let mut conn = self.pool.acquire().await?;
        if let Some(record) = db::tracks::get_track_by_isrc(&mut conn, isrc).await? {
            return Ok(Some(record.into_track()?));
        }
        // Release the connection before going to the network
        drop(conn);

        Ok(self.provider.search_by_isrc(isrc).await?)
    }

    /// Queue a code for the next reconciliation pass. Returns false when it
    /// was already queued.
    pub async fn queue_missing_isrc(&self, isrc: &Isrc) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(db::backlog::insert_backlog_entry(&mut conn, isrc).await?)
    }

    /// The codes currently queued, in code order.
    pub async fn missing_isrcs(&self) -> Result<Vec<String>> {
        let mut conn = self.pool.acquire().await?;
        Ok(db::backlog::get_backlog(&mut conn).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mocks::MockStreamingApi;
    use crate::provider::ProviderError;
    use crate::services::TrackService;
    use crate::test_utils::{sample_track, sample_track_with_isrc, temp_db};

    async fn queue(pool: &SqlitePool, code: &str) {
        let mut conn = pool.acquire().await.unwrap();
        let isrc = Isrc::new(code).unwrap();
        db::backlog::insert_backlog_entry(&mut conn, &isrc)
            .await
            .unwrap();
    }

    async fn backlog_codes(pool: &SqlitePool) -> Vec<String> {
        let mut conn = pool.acquire().await.unwrap();
        db::backlog::get_backlog(&mut conn).await.unwrap()
    }

    #[tokio::test]
    async fn test_already_stored_code_is_dequeued_without_provider_call() {
        let (pool, _dir) = temp_db().await;
        let stored = TrackService::new(pool.clone())
            .store(&sample_track())
            .await
            .unwrap();
        queue(&pool, stored.isrc().as_str()).await;

        let provider = Arc::new(MockStreamingApi::empty());
        let service = SyncService::new(pool.clone(), provider.clone());

        let report = service.sync_missing_isrcs().await.unwrap();

        assert_eq!(report.resolved, 1);
        assert_eq!(report.imported, 0);
        assert_eq!(report.unresolved, 0);
        assert!(backlog_codes(&pool).await.is_empty());
        assert!(provider.calls().is_empty(), "provider must not be consulted");
    }

    #[tokio::test]
    async fn test_provider_match_is_imported_and_dequeued() {
        let (pool, _dir) = temp_db().await;
        let track = sample_track();
        let isrc = track.isrc().clone();
        queue(&pool, isrc.as_str()).await;

        let provider = Arc::new(MockStreamingApi::with_track(&isrc, track.clone()));
        let service = SyncService::new(pool.clone(), provider.clone());

        let report = service.sync_missing_isrcs().await.unwrap();

        assert_eq!(report.imported, 1);
        assert!(backlog_codes(&pool).await.is_empty());
        assert_eq!(provider.calls().len(), 1);

        let found = TrackService::new(pool.clone())
            .search_by_isrc(&isrc)
            .await
            .unwrap()
            .expect("imported track must be stored");
        assert_eq!(found.title(), track.title());
        assert_eq!(found.album().title(), track.album().title());
        assert!(!found.artists().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_code_stays_queued() {
        let (pool, _dir) = temp_db().await;
        queue(&pool, "QZNJX2081700").await;

        let service = SyncService::new(pool.clone(), Arc::new(MockStreamingApi::empty()));
        let report = service.sync_missing_isrcs().await.unwrap();

        assert_eq!(report.unresolved, 1);
        assert_eq!(backlog_codes(&pool).await, vec!["QZNJX2081700"]);
    }

    #[tokio::test]
    async fn test_mixed_backlog_is_partitioned() {
        let (pool, _dir) = temp_db().await;

        // One already stored, one importable, one unknown
        let stored = TrackService::new(pool.clone())
            .store(&sample_track())
            .await
            .unwrap();
        let importable = sample_track_with_isrc("BR1SP1200071");
        queue(&pool, stored.isrc().as_str()).await;
        queue(&pool, importable.isrc().as_str()).await;
        queue(&pool, "QZNJX2081700").await;

        let provider = Arc::new(MockStreamingApi::with_track(
            importable.isrc(),
            importable.clone(),
        ));
        let service = SyncService::new(pool.clone(), provider.clone());

        let report = service.sync_missing_isrcs().await.unwrap();

        assert_eq!(report.resolved, 1);
        assert_eq!(report.imported, 1);
        assert_eq!(report.unresolved, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(backlog_codes(&pool).await, vec!["QZNJX2081700"]);
    }

    #[tokio::test]
    async fn test_import_reuses_stored_artists_and_albums() {
        let (pool, _dir) = temp_db().await;

        // Two queued tracks from the same album
        let first = sample_track();
        let second = sample_track_with_isrc("US7QQ1846811");
        queue(&pool, first.isrc().as_str()).await;
        queue(&pool, second.isrc().as_str()).await;

        let provider = Arc::new(
            MockStreamingApi::with_track(first.isrc(), first.clone())
                .add_track(second.isrc(), second.clone()),
        );
        let service = SyncService::new(pool.clone(), provider);

        let report = service.sync_missing_isrcs().await.unwrap();
        assert_eq!(report.imported, 2);

        let albums: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(albums, 1, "shared album must not be duplicated");

        let artists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(artists, first.artists().len() as i64);
    }

    #[tokio::test]
    async fn test_provider_failure_rolls_back_whole_pass() {
        let (pool, _dir) = temp_db().await;

        // The resolved entry is dequeued first (the backlog is walked in
        // code order), then the provider blows up on the second entry
        let stored = TrackService::new(pool.clone())
            .store(&sample_track())
            .await
            .unwrap();
        queue(&pool, stored.isrc().as_str()).await;
        queue(&pool, "US9ZZ9999999").await;

        let service = SyncService::new(
            pool.clone(),
            Arc::new(MockStreamingApi::with_error(ProviderError::RateLimited)),
        );

        let result = service.sync_missing_isrcs().await;
        assert!(result.is_err());

        let codes = backlog_codes(&pool).await;
        assert_eq!(
            codes.len(),
            2,
            "a failed pass must leave the backlog untouched"
        );
    }

    #[tokio::test]
    async fn test_malformed_queued_code_aborts_pass() {
        let (pool, _dir) = temp_db().await;
        sqlx::query("INSERT INTO missing_isrcs (code) VALUES ('garbage')")
            .execute(&pool)
            .await
            .unwrap();

        let provider = Arc::new(MockStreamingApi::empty());
        let service = SyncService::new(pool.clone(), provider.clone());

        assert!(service.sync_missing_isrcs().await.is_err());
        assert!(provider.calls().is_empty());
        assert_eq!(backlog_codes(&pool).await, vec!["garbage"]);
    }

    #[tokio::test]
    async fn test_sync_isrc_prefers_the_catalog() {
        let (pool, _dir) = temp_db().await;
        let stored = TrackService::new(pool.clone())
            .store(&sample_track())
            .await
            .unwrap();

        let provider = Arc::new(MockStreamingApi::empty());
        let service = SyncService::new(pool.clone(), provider.clone());

        let found = service.sync_isrc(stored.isrc()).await.unwrap().unwrap();
        assert_eq!(found.title(), stored.title());
        assert!(found.id().is_some());
        assert!(provider.calls().is_empty(), "local hit must skip the provider");
    }

    #[tokio::test]
    async fn test_sync_isrc_does_not_write_back() {
        let (pool, _dir) = temp_db().await;
        let track = sample_track();
        let isrc = track.isrc().clone();

        let provider = Arc::new(MockStreamingApi::with_track(&isrc, track.clone()));
        let service = SyncService::new(pool.clone(), provider);

        let found = service.sync_isrc(&isrc).await.unwrap().unwrap();
        assert_eq!(found.title(), track.title());
        assert!(found.id().is_none(), "provider hit carries no storage id");

        let stored = TrackService::new(pool.clone())
            .search_by_isrc(&isrc)
            .await
            .unwrap();
        assert_eq!(stored, None, "read-through must not persist");
    }

    #[tokio::test]
    async fn test_sync_isrc_misses_both_sides() {
        let (pool, _dir) = temp_db().await;
        let service = SyncService::new(pool.clone(), Arc::new(MockStreamingApi::empty()));

        let isrc = Isrc::new("BXKZM1900338").unwrap();
        assert_eq!(service.sync_isrc(&isrc).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_queue_missing_isrc_deduplicates() {
        let (pool, _dir) = temp_db().await;
        let service = SyncService::new(pool.clone(), Arc::new(MockStreamingApi::empty()));

        let isrc = Isrc::new("BXKZM1900345").unwrap();
        assert!(service.queue_missing_isrc(&isrc).await.unwrap());
        assert!(!service.queue_missing_isrc(&isrc).await.unwrap());
        assert_eq!(service.missing_isrcs().await.unwrap(), vec!["BXKZM1900345"]);
    }
}
