pub mod config;
pub mod export;
pub mod scraping;
pub mod web;

pub use config::AppConfig;
pub use web::start_web_server;
