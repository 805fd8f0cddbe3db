// src/web/handlers.rs
use rocket::form::Form;
use rocket::State;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::scraping::{pipeline, ScrapeOutcome, SearchRequest};

use super::types::ScrapeForm;

const DEFAULT_MAX_PAGES: u32 = 3;

/// Run the scrape pipeline for one form submission and report the outcome
/// as a short human-readable status string.
pub async fn scrape_handler(form: Form<ScrapeForm>, config: &State<AppConfig>) -> String {
    let request = SearchRequest::new(
        &form.keywords,
        &form.locations,
        form.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
    );
    let user_prompt = form.user_prompt.clone().unwrap_or_default();
    let priority_keywords =
        crate::scraping::split_terms(form.priority_keywords.as_deref().unwrap_or(""));

    info!(
        "Scrape requested: keywords={:?} locations={:?} max_pages={}",
        request.keywords, request.locations, request.max_pages
    );

    match pipeline::run(config, &request, &user_prompt, &priority_keywords).await {
        Ok(ScrapeOutcome::NoResults) => "No job listings found.".to_string(),
        Ok(ScrapeOutcome::Saved {
            spreadsheet,
            csv,
            analyzed,
        }) => format!(
            "Results saved to {} and {} ({} listings analyzed).",
            spreadsheet.display(),
            csv.display(),
            analyzed
        ),
        Err(e) => {
            error!("Scrape run failed: {:#}", e);
            format!("Scrape failed: {:#}", e)
        }
    }
}
