// src/web/types.rs
use rocket::form::FromForm;
use rocket::serde::Serialize;

/// The minimal search form. Only keywords and locations are required;
/// everything else falls back to its default.
#[derive(FromForm)]
pub struct ScrapeForm {
    pub keywords: String,
    pub locations: String,
    pub max_pages: Option<u32>,
    pub user_prompt: Option<String>,
    pub priority_keywords: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
}
