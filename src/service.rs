// src/service.rs
//
// Shared directory state behind the HTTP API. The first request that needs
// data triggers one scrape; later requests reuse the store until a refresh.
// A refresh swaps the whole store, so readers see the old or the new
// snapshot and never a half-built one.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use crate::{
    config::ScrapeOptions,
    core::Fetch,
    normalize::Normalizer,
    scrape::collect_members,
    store::MemberStore,
};

pub struct DirectoryService {
    opts: ScrapeOptions,
    fetcher: Arc<dyn Fetch>,
    normalizer: Arc<Normalizer>,
    current: RwLock<Option<Arc<MemberStore>>>,
    /// Serializes scrape runs.
    run_lock: Mutex<()>,
}

impl DirectoryService {
    pub fn new(opts: ScrapeOptions, fetcher: Arc<dyn Fetch>, normalizer: Normalizer) -> Self {
        Self {
            opts,
            fetcher,
            normalizer: Arc::new(normalizer),
            current: RwLock::new(None),
            run_lock: Mutex::new(()),
        }
    }

    /// Pre-loaded with `store`; no scrape happens until `refresh`.
    pub fn with_store(self, store: MemberStore) -> Self {
        Self { current: RwLock::new(Some(Arc::new(store))), ..self }
    }

    /// Current snapshot, scraping once if nothing is loaded yet.
    pub async fn store(&self) -> Arc<MemberStore> {
        if let Some(s) = self.current.read().await.as_ref() {
            return Arc::clone(s);
        }
        let _run = self.run_lock.lock().await;
        // Another request may have finished the first scrape while we waited.
        if let Some(s) = self.current.read().await.as_ref() {
            return Arc::clone(s);
        }
        let fresh = Arc::new(self.scrape().await);
        *self.current.write().await = Some(Arc::clone(&fresh));
        fresh
    }

    /// Re-scrape and replace the snapshot wholesale.
    pub async fn refresh(&self) -> Arc<MemberStore> {
        let _run = self.run_lock.lock().await;
        let fresh = Arc::new(self.scrape().await);
        *self.current.write().await = Some(Arc::clone(&fresh));
        fresh
    }

    /// Loaded member count, if a snapshot exists. Never scrapes.
    pub async fn loaded_count(&self) -> Option<usize> {
        self.current.read().await.as_ref().map(|s| s.len())
    }

    /// A failed run yields an empty store; the error is logged, not returned.
    async fn scrape(&self) -> MemberStore {
        let opts = self.opts.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let normalizer = Arc::clone(&self.normalizer);

        let joined = tokio::task::spawn_blocking(move || {
            collect_members(&opts, fetcher.as_ref(), &normalizer, None)
        })
        .await;

        match joined {
            Ok(Ok(report)) => {
                info!("Loaded {} member(s)", report.members.len());
                MemberStore::new(report.members)
            }
            Ok(Err(e)) => {
                error!("Scrape failed: {e}");
                MemberStore::default()
            }
            Err(e) => {
                error!("Scrape task aborted: {e}");
                MemberStore::default()
            }
        }
    }
}
