//! HTTP client for the ballet API.
//!
//! Every request is a blocking JSON GET. Any transport error or non-success
//! status becomes [`BalletError::Transport`]; a body that does not decode
//! becomes [`BalletError::Serialization`].

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::normalize::{PerformanceListing, RawPerformance};
use crate::error::{BalletError, Result};
use crate::model::Company;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Optional search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

/// Client for the ballet REST API.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| BalletError::ConfigParseError {
            path: "api_base_url".into(),
            message: format!("invalid URL '{}': {}", base_url, e),
        })?;

        let client = Client::builder()
            .user_agent(concat!("world-ballets/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build an endpoint URL from path segments and query pairs.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BalletError::ConfigParseError {
                path: "api_base_url".into(),
                message: format!("'{}' cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// GET a URL and decode its JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| BalletError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BalletError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().map_err(|e| BalletError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| BalletError::Serialization {
            context: format!("response from {}", url),
            message: e.to_string(),
        })
    }

    /// `GET /companies/{id}`
    pub fn company(&self, company_id: &str) -> Result<Company> {
        self.get_json(self.endpoint(&["companies", company_id], &[])?)
    }

    /// `GET /companies`
    pub fn companies(&self) -> Result<Vec<Company>> {
        self.get_json(self.endpoint(&["companies"], &[])?)
    }

    /// `GET /companies/{id}/performances`
    pub fn company_performances(&self, company_id: &str) -> Result<PerformanceListing> {
        self.get_json(self.endpoint(&["companies", company_id, "performances"], &[])?)
    }

    /// `GET /performances/{company}/{performance}`
    pub fn performance(&self, company_id: &str, performance_id: &str) -> Result<RawPerformance> {
        self.get_json(self.endpoint(&["performances", company_id, performance_id], &[])?)
    }

    /// `GET /performances?current=true&limit=N`
    pub fn current_performances(&self, limit: u32) -> Result<PerformanceListing> {
        let query = [("current", "true".to_string()), ("limit", limit.to_string())];
        self.get_json(self.endpoint(&["performances"], &query)?)
    }

    /// `GET /performances/current`
    pub fn all_current_performances(&self) -> Result<PerformanceListing> {
        self.get_json(self.endpoint(&["performances", "current"], &[])?)
    }

    /// `GET /search?q=...&company=...&limit=...&skip=...`
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<PerformanceListing> {
        let mut params = vec![("q", query.to_string())];
        if let Some(company) = &options.company {
            params.push(("company", company.clone()));
        }
        if let Some(limit) = options.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(skip) = options.skip {
            params.push(("skip", skip.to_string()));
        }
        self.get_json(self.endpoint(&["search"], &params)?)
    }
}
