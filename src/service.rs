//! Data access orchestration.
//!
//! [`DataService`] answers every question the front end asks about companies
//! and performances. Each operation checks the expiring cache first (unless
//! bypassed), then the ballet API, and finally the embedded fallback catalog.
//! Network and decoding failures are logged and never reach the caller.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{normalize_listing, ApiClient, SearchOptions};
use crate::cache::{CacheStats, ExpiringCache, FileStore, KeyValueStore};
use crate::clock::Clock;
use crate::config::{Placeholders, ServiceConfig};
use crate::error::{BalletError, Result};
use crate::fallback::FallbackCatalog;
use crate::model::{Company, Performance};
use crate::schedule::{annotate, is_current, is_past, CompanySchedule};

/// Number of performances featured on the home listing.
pub const DEFAULT_FEATURED_COUNT: u32 = 3;

/// What a refresh of one company did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    /// Cache entries removed before refetching.
    pub cleared: usize,
    /// Whether the company profile was found.
    pub company_found: bool,
    /// Performances of the company.
    pub performances: usize,
    /// Performances in the aggregate current listing.
    pub current: usize,
    /// Featured performances.
    pub featured: usize,
}

/// Cache-first access to the ballet API with offline fallback.
pub struct DataService {
    api: ApiClient,
    cache: ExpiringCache,
    fallback: FallbackCatalog,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
    today: Option<NaiveDate>,
}

impl DataService {
    /// Build a service over an explicit store and clock.
    pub fn new(
        config: ServiceConfig,
        store: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
        let cache = ExpiringCache::new(store, Arc::clone(&clock), config.cache_settings()?);
        let fallback = FallbackCatalog::embedded()?;

        Ok(Self {
            api,
            cache,
            fallback,
            clock,
            config,
            today: None,
        })
    }

    /// Build a service persisting its cache under `cache_dir`.
    pub fn open(config: ServiceConfig, cache_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = FileStore::with_quota(cache_dir, config.cache.quota_bytes);
        Self::new(config, Box::new(store), clock)
    }

    /// Replace the fallback catalog.
    pub fn with_fallback(mut self, fallback: FallbackCatalog) -> Self {
        self.fallback = fallback;
        self
    }

    /// Classify schedules against a fixed date instead of the clock's.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Reference date for classification.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| self.clock.today())
    }

    /// Active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The fallback catalog.
    pub fn fallback(&self) -> &FallbackCatalog {
        &self.fallback
    }

    /// The response cache.
    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    /// The response cache, mutably.
    pub fn cache_mut(&mut self) -> &mut ExpiringCache {
        &mut self.cache
    }

    /// Entry counts of the response cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached response.
    pub fn clear_cache(&mut self) -> usize {
        self.cache.clear()
    }

    /// A company profile.
    ///
    /// `Ok(None)` means the company is unknown both upstream and offline.
    pub fn company_info(&mut self, company_id: &str, bypass_cache: bool) -> Result<Option<Company>> {
        require(company_id, "Company ID")?;

        let key = format!("company_{}", company_id);
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, _| api.company(company_id));

        Ok(fetched.or_else(|| self.fallback.company(company_id).cloned()))
    }

    /// Every company profile.
    pub fn all_companies(&mut self, bypass_cache: bool) -> Vec<Company> {
        self.cached_or_fetch("all_companies", bypass_cache, |api, _| api.companies())
            .unwrap_or_else(|| self.fallback.companies().to_vec())
    }

    /// A company's performances, classified against today.
    pub fn company_performances(
        &mut self,
        company_id: &str,
        bypass_cache: bool,
    ) -> Result<Vec<Performance>> {
        require(company_id, "Company ID")?;

        let key = format!("performances_{}", company_id);
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, placeholders| {
            api.company_performances(company_id)
                .map(|listing| normalize_listing(listing, Some(company_id), placeholders))
        });

        let performances = fetched.unwrap_or_else(|| self.fallback.performances(company_id));
        Ok(self.classified(performances))
    }

    /// A company's season split into display sections.
    ///
    /// The past section is left empty for companies configured to hide it.
    pub fn company_schedule(&mut self, company_id: &str, bypass_cache: bool) -> Result<CompanySchedule> {
        let performances = self.company_performances(company_id, bypass_cache)?;
        let show_past = self.config.company(company_id).show_past_performances;

        Ok(CompanySchedule::build(
            performances,
            self.today(),
            &self.config.classifier_settings(),
            show_past,
        ))
    }

    /// One performance of a company.
    pub fn performance_details(
        &mut self,
        company_id: &str,
        performance_id: &str,
        bypass_cache: bool,
    ) -> Result<Option<Performance>> {
        require(company_id, "Company ID")?;
        require(performance_id, "Performance ID")?;

        let key = format!("performance_{}_{}", company_id, performance_id);
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, placeholders| {
            api.performance(company_id, performance_id)
                .map(|raw| raw.normalize(Some(company_id), placeholders))
        });

        let today = self.today();
        let settings = self.config.classifier_settings();
        Ok(fetched
            .or_else(|| self.fallback.performance(company_id, performance_id))
            .map(|mut performance| {
                performance.is_past = is_past(&performance, today);
                performance.is_current = is_current(&performance, today, &settings);
                performance
            }))
    }

    /// Up to `limit` current performances across companies.
    pub fn current_performances(&mut self, limit: u32, bypass_cache: bool) -> Vec<Performance> {
        let key = format!("current_performances_{}", limit);
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, placeholders| {
            api.current_performances(limit)
                .map(|listing| normalize_listing(listing, None, placeholders))
        });

        let performances = fetched.unwrap_or_else(|| self.listed_current(Some(limit)));
        self.classified(performances)
    }

    /// Every current performance across companies.
    pub fn all_current_performances(&mut self, bypass_cache: bool) -> Vec<Performance> {
        let fetched = self.cached_or_fetch("all_current_performances", bypass_cache, |api, placeholders| {
            api.all_current_performances()
                .map(|listing| normalize_listing(listing, None, placeholders))
        });

        let performances = fetched.unwrap_or_else(|| self.listed_current(None));
        self.classified(performances)
    }

    /// The first `count` current performances, for the home listing.
    pub fn featured_performances(&mut self, count: u32, bypass_cache: bool) -> Vec<Performance> {
        let key = format!("featured_performances_{}", count);
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, placeholders| {
            api.current_performances(count)
                .map(|listing| normalize_listing(listing, None, placeholders))
        });

        let mut performances = fetched.unwrap_or_else(|| self.listed_current(None));
        performances.truncate(count as usize);
        self.classified(performances)
    }

    /// Performances whose title or description matches `query`.
    ///
    /// An empty query matches nothing and makes no request.
    pub fn search(
        &mut self,
        query: &str,
        options: &SearchOptions,
        bypass_cache: bool,
    ) -> Vec<Performance> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let key = format!(
            "search_{}_{}",
            query,
            serde_json::to_string(options).unwrap_or_default()
        );
        let fetched = self.cached_or_fetch(&key, bypass_cache, |api, placeholders| {
            api.search(query, options)
                .map(|listing| normalize_listing(listing, None, placeholders))
        });

        let performances = fetched.unwrap_or_else(|| self.offline_search(query, options));
        self.classified(performances)
    }

    /// Clear the cache, then refetch everything shown for `company_id`.
    ///
    /// The fetches run one after another and all bypass the cache, so the
    /// cache ends up holding fresh copies.
    pub fn invalidate_and_refetch(&mut self, company_id: &str) -> Result<RefreshSummary> {
        require(company_id, "Company ID")?;

        let cleared = self.cache.clear();
        let company_found = self.company_info(company_id, true)?.is_some();
        let performances = self.company_performances(company_id, true)?.len();
        let current = self.all_current_performances(true).len();
        let featured = self.featured_performances(DEFAULT_FEATURED_COUNT, true).len();

        info!("Refreshed data for {}", company_id);

        Ok(RefreshSummary {
            cleared,
            company_found,
            performances,
            current,
            featured,
        })
    }

    /// Cache lookup, then network fetch. `None` means the caller falls back.
    ///
    /// Successful fetches are cached; fallback data never is.
    fn cached_or_fetch<T, F>(&mut self, key: &str, bypass_cache: bool, fetch: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&ApiClient, &Placeholders) -> Result<T>,
    {
        if !bypass_cache {
            if let Some(hit) = self.cache.get_as::<T>(key) {
                debug!("Cache hit for {}", key);
                return Some(hit);
            }
        }

        match fetch(&self.api, &self.config.placeholders) {
            Ok(value) => {
                self.cache.set(key, &value);
                Some(value)
            }
            Err(e) => {
                warn!("Falling back to offline data for {}: {}", key, e);
                None
            }
        }
    }

    fn classified(&self, mut performances: Vec<Performance>) -> Vec<Performance> {
        annotate(
            &mut performances,
            self.today(),
            &self.config.classifier_settings(),
        );
        performances
    }

    // Offline current listing, without companies kept out of listings.
    fn listed_current(&self, limit: Option<u32>) -> Vec<Performance> {
        let mut current: Vec<Performance> = self
            .fallback
            .current_performances(self.today(), &self.config.classifier_settings())
            .into_iter()
            .filter(|p| {
                p.company
                    .as_deref()
                    .map_or(true, |id| self.config.company(id).include_in_listings)
            })
            .collect();

        if let Some(limit) = limit {
            current.truncate(limit as usize);
        }
        current
    }

    fn offline_search(&self, query: &str, options: &SearchOptions) -> Vec<Performance> {
        let matches = self
            .fallback
            .search(query)
            .into_iter()
            .filter(|p| options.company.as_deref().map_or(true, |id| p.belongs_to(id)))
            .skip(options.skip.unwrap_or(0) as usize);

        match options.limit {
            Some(limit) => matches.take(limit as usize).collect(),
            None => matches.collect(),
        }
    }
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(BalletError::missing(what))
    } else {
        Ok(())
    }
}
