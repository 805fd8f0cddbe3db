// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::AppConfig;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{get, options, post, routes, Request, Response, State};
use tracing::info;

static INDEX_HTML: &str = include_str!("index.html");

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

#[post("/scrape", data = "<form>")]
pub async fn scrape(form: Form<ScrapeForm>, config: &State<AppConfig>) -> String {
    handlers::scrape_handler(form, config).await
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[options("/<_..>")]
pub fn options() -> Status {
    Status::Ok
}

/// Launch the web surface on the given port.
pub async fn start_web_server(config: AppConfig, port: u16) -> Result<()> {
    config.ensure_directories().await?;

    info!("Starting job scout server on port {}", port);
    info!("Output directory: {}", config.output_dir.display());

    let figment = rocket::Config::figment().merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(config)
        .mount("/", routes![index, scrape, health, options])
        .launch()
        .await?;

    Ok(())
}
