// src/scraping/extract.rs
use chrono::Local;
use scraper::{ElementRef, Html, Selector};

use super::{salary, JobDetail, JobListing, DATE_NOT_SPECIFIED, DESCRIPTION_NOT_FOUND};

const CARD_SELECTOR: &str = "div.base-card";
const TITLE_SELECTOR: &str = "h3.base-search-card__title";
const COMPANY_SELECTOR: &str = "h4.base-search-card__subtitle";
const LOCATION_SELECTOR: &str = "span.job-search-card__location";
const LINK_SELECTOR: &str = "a.base-card__full-link";
const DATE_SELECTOR: &str = "time.job-search-card__listdate";

const DESCRIPTION_SELECTORS: [&str; 2] = [
    "div[class*='description']",
    "section[class*='description']",
];

/// Parse one search-results page and extract every listing card on it.
/// An empty or unrecognizable page yields an empty vector.
pub fn parse_search_page(html: &str, keyword: &str, city: &str) -> Vec<JobListing> {
    let document = Html::parse_document(html);
    let Ok(cards) = Selector::parse(CARD_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&cards)
        .map(|card| extract_listing(&card, keyword, city))
        .collect()
}

/// Pull the five card fields, each independently. A missing node yields the
/// field's default; a single bad field never discards the card.
pub fn extract_listing(card: &ElementRef, keyword: &str, city: &str) -> JobListing {
    let date_posted = select_text(card, DATE_SELECTOR);

    JobListing {
        title: select_text(card, TITLE_SELECTOR),
        company: select_text(card, COMPANY_SELECTOR),
        location: select_text(card, LOCATION_SELECTOR),
        link: select_attr(card, LINK_SELECTOR, "href"),
        keyword: keyword.to_string(),
        search_city: city.to_string(),
        date_posted: if date_posted.is_empty() {
            DATE_NOT_SPECIFIED.to_string()
        } else {
            date_posted
        },
        date_scraped: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Parse a detail page: the description is the text of the first element
/// whose class attribute contains "description" (block elements first, then
/// sections), and the salary is mined from that text.
pub fn parse_detail(html: &str) -> JobDetail {
    let document = Html::parse_document(html);

    let description = DESCRIPTION_SELECTORS
        .iter()
        .find_map(|selector_str| {
            let selector = Selector::parse(selector_str).ok()?;
            document.select(&selector).next().map(|el| collect_text(&el))
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DESCRIPTION_NOT_FOUND.to_string());

    let salary = salary::extract_salary(&description);

    JobDetail {
        description,
        salary,
    }
}

fn select_text(card: &ElementRef, selector_str: &str) -> String {
    if let Ok(selector) = Selector::parse(selector_str) {
        if let Some(element) = card.select(&selector).next() {
            return collect_text(&element);
        }
    }
    String::new()
}

fn select_attr(card: &ElementRef, selector_str: &str, attr: &str) -> String {
    if let Ok(selector) = Selector::parse(selector_str) {
        if let Some(element) = card.select(&selector).next() {
            return element.value().attr(attr).unwrap_or_default().to_string();
        }
    }
    String::new()
}

/// Join an element's text nodes with single spaces and collapse whitespace.
fn collect_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
