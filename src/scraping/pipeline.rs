// src/scraping/pipeline.rs
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::export;

use super::{score, scraper, Classifier, JobScraper, SearchRequest};

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// The crawl produced nothing; every later stage was skipped.
    NoResults,
    Saved {
        spreadsheet: PathBuf,
        csv: PathBuf,
        analyzed: usize,
    },
}

/// Run the whole batch: crawl -> dedupe -> detail-fetch -> classify/score
/// -> persist. The listing collection is an owned value handed from stage
/// to stage; nothing is shared or retained between runs.
pub async fn run(
    config: &AppConfig,
    request: &SearchRequest,
    user_prompt: &str,
    priority_keywords: &[String],
) -> Result<ScrapeOutcome> {
    let scraper = JobScraper::new(&config.scraper)?;

    let listings = scraper.scrape_jobs(request).await;
    let unique = scraper::dedupe_by_link(listings);
    info!("Collected {} unique listing(s)", unique.len());

    if unique.is_empty() {
        return Ok(ScrapeOutcome::NoResults);
    }

    let scraped = scraper.fetch_details(unique).await;

    // keyword matching is case-insensitive; fold once here for every stage
    let keywords: Vec<String> = priority_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let classifier = Classifier::default();
    let analyzed = score::analyze(scraped, user_prompt, &keywords, &classifier);

    let (spreadsheet, csv) = export::save_results(&analyzed, &config.output_dir)?;

    Ok(ScrapeOutcome::Saved {
        spreadsheet,
        csv,
        analyzed: analyzed.len(),
    })
}
