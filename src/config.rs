// src/config.rs
//! Unified configuration - environment driven, no config files
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const DEFAULT_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub output_dir: PathBuf,
}

/// Network and pacing knobs for the crawl. Defaults carry the production
/// values; tests zero the delays and point `search_url` at a stub.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub search_url: String,
    pub user_agent: String,
    pub search_timeout: Duration,
    pub detail_timeout: Duration,
    /// Uniform sleep range between search-page requests, seconds.
    pub page_delay: (f64, f64),
    /// Uniform sleep range between detail-page requests, seconds.
    pub detail_delay: (f64, f64),
    /// Fixed sleep after a failed search-page combination.
    pub error_backoff: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            search_timeout: Duration::from_secs(15),
            detail_timeout: Duration::from_secs(12),
            page_delay: (2.0, 5.0),
            detail_delay: (1.5, 4.0),
            error_backoff: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        let mut scraper = ScraperConfig::default();
        if let Ok(url) = std::env::var("JOB_SEARCH_URL") {
            scraper.search_url = url;
        }

        Ok(Self {
            scraper,
            output_dir: base_dir.join("out"),
        })
    }

    /// Ensure the output directory exists.
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create output directory: {}", self.output_dir.display())
            })
    }
}
