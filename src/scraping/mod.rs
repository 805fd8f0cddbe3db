// src/scraping/mod.rs
use serde::{Deserialize, Serialize};

pub mod classify;
pub mod extract;
pub mod pipeline;
pub mod salary;
pub mod score;
pub mod scraper;

pub use self::classify::{Classifier, Language, Seniority};
pub use self::pipeline::ScrapeOutcome;
pub use self::scraper::JobScraper;

/// Placeholder written when a listing card carries no posting date.
pub const DATE_NOT_SPECIFIED: &str = "not specified";
/// Placeholder for a detail page with no recognizable salary figure.
pub const SALARY_UNSPECIFIED: &str = "unspecified";
/// Description placeholder when the detail page has no description block.
pub const DESCRIPTION_NOT_FOUND: &str = "not found";
/// Description placeholder when the detail page could not be fetched.
pub const DESCRIPTION_LOAD_ERROR: &str = "load error";
/// Description placeholder for listings without a detail link.
pub const LINK_UNAVAILABLE: &str = "link unavailable";
/// Backfill value for export columns with no computed data.
pub const NOT_DETERMINED: &str = "not determined";

/// One search run, built from the raw form or CLI input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub max_pages: u32,
}

impl SearchRequest {
    pub fn new(keywords: &str, locations: &str, max_pages: u32) -> Self {
        Self {
            keywords: split_terms(keywords),
            locations: split_terms(locations),
            max_pages,
        }
    }
}

/// Split comma-separated user input, trimming and discarding empty tokens.
/// Order and duplicates are preserved.
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(String::from)
        .collect()
}

/// One row per raw search-result card, before its detail page is fetched.
/// `link` is the natural key for deduplication; an empty link means the
/// listing has no detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub keyword: String,
    pub search_city: String,
    pub date_posted: String,
    pub date_scraped: String,
}

/// What the detail-fetch phase adds to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    pub description: String,
    pub salary: String,
}

impl JobDetail {
    pub fn link_unavailable() -> Self {
        Self {
            description: LINK_UNAVAILABLE.to_string(),
            salary: SALARY_UNSPECIFIED.to_string(),
        }
    }

    pub fn load_error() -> Self {
        Self {
            description: DESCRIPTION_LOAD_ERROR.to_string(),
            salary: SALARY_UNSPECIFIED.to_string(),
        }
    }
}

/// A listing with its detail attached. The detail rides on the listing
/// record itself, never joined back by list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedJob {
    pub listing: JobListing,
    pub detail: JobDetail,
}

/// Fully classified and scored listing, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedJob {
    pub listing: JobListing,
    pub detail: JobDetail,
    pub brief_description: String,
    pub skills_match: String,
    pub remote_work: bool,
    pub seniority: Seniority,
    pub language: Language,
    /// 1 = high, 2 = medium, 3 = low.
    pub priority: u8,
}
