// src/core/search_client.rs
//! HTTP client for the upstream candidate search service

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::{debug, error, info, warn};

use crate::search::CandidateSearchParams;
use crate::types::response::{CandidateSearchResponse, SearchServiceError};

const CANDIDATE_SEARCH_ENDPOINT: &str = "/api/students/search";

pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    /// Create new search client with configuration
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for the given parameters
    pub fn search_url(&self, params: &CandidateSearchParams) -> Result<Url> {
        let endpoint = format!("{}{}", self.base_url, CANDIDATE_SEARCH_ENDPOINT);
        Url::parse_with_params(&endpoint, params.to_pairs())
            .with_context(|| format!("Invalid search service URL: {}", endpoint))
    }

    /// Fetch one page of candidates; the list is capped at `params.limit`
    pub async fn search_candidates(
        &self,
        params: &CandidateSearchParams,
    ) -> Result<CandidateSearchResponse> {
        let url = self.search_url(params)?;

        info!(
            "Searching candidates (page {}, limit {})",
            params.page, params.limit
        );
        debug!("Candidate search URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to call candidate search service")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read search service response")?;

        if !status.is_success() {
            let error_message = match serde_json::from_str::<SearchServiceError>(&response_text) {
                Ok(error_response) => error_response.error,
                Err(_) => response_text,
            };
            error!("Search service error {}: {}", status, error_message);
            anyhow::bail!("Search service returned {}: {}", status, error_message);
        }

        let mut result: CandidateSearchResponse = serde_json::from_str(&response_text)
            .context("Failed to parse candidate search response")?;

        cap_candidates(&mut result, params.limit);
        Ok(result)
    }
}

fn cap_candidates(result: &mut CandidateSearchResponse, limit: u32) {
    let limit = limit as usize;
    if result.candidates.len() > limit {
        warn!(
            "Search service returned {} candidates for limit {}, truncating",
            result.candidates.len(),
            limit
        );
        result.candidates.truncate(limit);
    }
}
