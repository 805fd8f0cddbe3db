// src/scraping/scraper.rs
use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::ScraperConfig;

use super::{extract, JobDetail, JobListing, ScrapedJob, SearchRequest};

pub struct JobScraper {
    client: Client,
    config: ScraperConfig,
}

impl JobScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Crawl phase: one search page per location x keyword x page offset,
    /// strictly sequential. A failed combination is logged, waited out and
    /// skipped; its results are simply absent.
    pub async fn scrape_jobs(&self, request: &SearchRequest) -> Vec<JobListing> {
        info!(
            "Starting crawl: {} keyword(s), {} location(s), {} page(s) each",
            request.keywords.len(),
            request.locations.len(),
            request.max_pages
        );

        let mut listings = Vec::new();

        for city in &request.locations {
            for keyword in &request.keywords {
                for page in 0..request.max_pages {
                    let start = page * 25;
                    match self.fetch_search_page(keyword, city, start).await {
                        Ok(html) => {
                            let cards = extract::parse_search_page(&html, keyword, city);
                            info!(
                                "Search page keyword={} location={} start={}: {} listing(s)",
                                keyword,
                                city,
                                start,
                                cards.len()
                            );
                            listings.extend(cards);
                            self.pause(self.config.page_delay).await;
                        }
                        Err(e) => {
                            warn!("Search page failed: {:#}", e);
                            tokio::time::sleep(self.config.error_backoff).await;
                        }
                    }
                }
            }
        }

        listings
    }

    /// Detail-fetch phase: one request per unique listing with a link.
    /// Listings without a link get their placeholder detail with no network
    /// call; a failed fetch records a load-error detail and moves on.
    pub async fn fetch_details(&self, listings: Vec<JobListing>) -> Vec<ScrapedJob> {
        let total = listings.len();
        info!("Fetching descriptions for {} listing(s)", total);

        let mut scraped = Vec::with_capacity(total);

        for (index, listing) in listings.into_iter().enumerate() {
            if listing.link.is_empty() {
                scraped.push(ScrapedJob {
                    detail: JobDetail::link_unavailable(),
                    listing,
                });
                continue;
            }

            info!(
                "{}/{} | {}",
                index + 1,
                total,
                listing.title.chars().take(50).collect::<String>()
            );

            let detail = match self.fetch_detail_page(&listing.link).await {
                Ok(html) => {
                    let detail = extract::parse_detail(&html);
                    self.pause(self.config.detail_delay).await;
                    detail
                }
                Err(e) => {
                    warn!("Detail page failed: {:#}", e);
                    JobDetail::load_error()
                }
            };

            scraped.push(ScrapedJob { listing, detail });
        }

        scraped
    }

    async fn fetch_search_page(&self, keyword: &str, city: &str, start: u32) -> Result<String> {
        let url = format!(
            "{}?keywords={}&location={}&start={}",
            self.config.search_url,
            keyword.replace(' ', "%20"),
            city.replace(' ', "%20"),
            start
        );

        self.fetch_page(&url, self.config.search_timeout).await
    }

    async fn fetch_detail_page(&self, link: &str) -> Result<String> {
        self.fetch_page(link, self.config.detail_timeout).await
    }

    async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} for {}", response.status(), url);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }

    async fn pause(&self, (min, max): (f64, f64)) {
        let delay = Duration::from_secs_f64(rand::thread_rng().gen_range(min..=max));
        tokio::time::sleep(delay).await;
    }
}

/// Drop listings whose link was already seen, first occurrence wins, order
/// preserved. Listings with an empty link are always kept; they have no
/// identity to merge on.
pub fn dedupe_by_link(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();

    listings
        .into_iter()
        .filter(|listing| listing.link.is_empty() || seen.insert(listing.link.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::{LINK_UNAVAILABLE, SALARY_UNSPECIFIED};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn listing(link: &str) -> JobListing {
        JobListing {
            title: format!("job {}", link),
            company: String::new(),
            location: String::new(),
            link: link.to_string(),
            keyword: "kw".to_string(),
            search_city: "city".to_string(),
            date_posted: "today".to_string(),
            date_scraped: "2026-08-06 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let deduped = dedupe_by_link(vec![listing("a"), listing("b"), listing("a"), listing("c")]);
        let links: Vec<&str> = deduped.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(links, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedupe_never_merges_empty_links() {
        let deduped = dedupe_by_link(vec![listing(""), listing("a"), listing(""), listing("")]);
        assert_eq!(deduped.len(), 4);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let once = dedupe_by_link(vec![listing("a"), listing("a"), listing(""), listing("")]);
        let twice = dedupe_by_link(once.clone());
        let links =
            |v: &[JobListing]| v.iter().map(|l| l.link.clone()).collect::<Vec<_>>();
        assert_eq!(links(&once), links(&twice));
    }

    /// Minimal HTTP stub on an already-bound listener: answers every
    /// connection with a canned body chosen by request path, counting
    /// detail hits.
    fn spawn_stub_site(
        server: tokio::net::TcpListener,
        search_body: String,
        detail_body: String,
        detail_hits: Arc<AtomicUsize>,
    ) {
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = server.accept().await else {
                    break;
                };
                let search_body = search_body.clone();
                let detail_body = detail_body.clone();
                let detail_hits = detail_hits.clone();

                tokio::spawn(async move {
                    let mut buf = vec![0u8; 2048];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();

                    let body = if request.contains("keywords=") {
                        search_body
                    } else {
                        detail_hits.fetch_add(1, Ordering::SeqCst);
                        detail_body
                    };

                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
    }

    fn fast_config(base: &str) -> ScraperConfig {
        ScraperConfig {
            search_url: format!("{}/jobs/search/", base),
            page_delay: (0.0, 0.0),
            detail_delay: (0.0, 0.0),
            error_backoff: Duration::from_millis(0),
            ..ScraperConfig::default()
        }
    }

    #[tokio::test]
    async fn test_crawl_and_detail_fetch_against_stub_site() {
        let detail_hits = Arc::new(AtomicUsize::new(0));

        let detail_body = r#"<html><body>
            <div class="jobs-description">Senior Python Software Engineer, remote work, €70.000 - €90.000</div>
        </body></html>"#
            .to_string();

        // the linked card's href is only known once the stub is bound, so
        // bind first and substitute the base URL into the fixture
        let server = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let base = format!("http://{}", server.local_addr().expect("stub addr"));

        let search_body = r#"<html><body>
            <div class="base-card">
                <h3 class="base-search-card__title">Python Developer</h3>
                <h4 class="base-search-card__subtitle">Acme GmbH</h4>
                <span class="job-search-card__location">Berlin</span>
                <a class="base-card__full-link" href="BASE/jobs/view/1">view</a>
                <time class="job-search-card__listdate">2 days ago</time>
            </div>
            <div class="base-card">
                <h3 class="base-search-card__title">Data Engineer</h3>
            </div>
        </body></html>"#
            .replace("BASE", &base);

        spawn_stub_site(server, search_body, detail_body, detail_hits.clone());

        let scraper = JobScraper::new(&fast_config(&base)).expect("scraper");
        let request = SearchRequest::new("Python Developer", "Berlin", 1);

        let stubs = scraper.scrape_jobs(&request).await;
        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title, "Python Developer");
        assert_eq!(stubs[1].link, "");

        let unique = dedupe_by_link(stubs);
        assert_eq!(unique.len(), 2);

        let scraped = scraper.fetch_details(unique).await;
        assert_eq!(scraped.len(), 2);

        let linked = &scraped[0];
        assert!(linked
            .detail
            .description
            .contains("Senior Python Software Engineer"));
        assert_eq!(linked.detail.salary, "€70.000 - €90.000");

        // the empty-link row never touched the network
        let unlinked = &scraped[1];
        assert_eq!(unlinked.detail.description, LINK_UNAVAILABLE);
        assert_eq!(unlinked.detail.salary, SALARY_UNSPECIFIED);
        assert_eq!(detail_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_combination_is_skipped_without_propagating() {
        // nothing is listening on this address, so every combination fails
        let config = ScraperConfig {
            search_url: "http://127.0.0.1:1/jobs/search/".to_string(),
            page_delay: (0.0, 0.0),
            detail_delay: (0.0, 0.0),
            error_backoff: Duration::from_millis(0),
            ..ScraperConfig::default()
        };

        let scraper = JobScraper::new(&config).expect("scraper");
        let request = SearchRequest::new("rust", "Berlin", 2);
        let listings = scraper.scrape_jobs(&request).await;
        assert!(listings.is_empty());
    }
}
