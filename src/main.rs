use anyhow::Result;
use clap::{Parser, Subcommand};
use job_scout::scraping::{pipeline, ScrapeOutcome, SearchRequest};
use job_scout::{start_web_server, AppConfig};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Scrape, rank and export job listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one scrape from the command line
    Scrape {
        /// Comma-separated search keywords
        #[arg(long)]
        keywords: String,
        /// Comma-separated search locations
        #[arg(long)]
        locations: String,
        #[arg(long, default_value_t = 3)]
        max_pages: u32,
        /// Free-text description of what you are looking for
        #[arg(long, default_value = "")]
        prompt: String,
        /// Comma-separated keywords to prioritize in ranking
        #[arg(long, default_value = "")]
        priority_keywords: String,
    },
}

fn env_port() -> u16 {
    std::env::var("ROCKET_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8000)
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("job_scout=info,jobscout=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        None => start_web_server(config, env_port()).await,
        Some(Command::Serve { port }) => {
            start_web_server(config, port.unwrap_or_else(env_port)).await
        }
        Some(Command::Scrape {
            keywords,
            locations,
            max_pages,
            prompt,
            priority_keywords,
        }) => {
            config.ensure_directories().await?;

            let request = SearchRequest::new(&keywords, &locations, max_pages);
            let priority_keywords = job_scout::scraping::split_terms(&priority_keywords);

            match pipeline::run(&config, &request, &prompt, &priority_keywords).await? {
                ScrapeOutcome::NoResults => println!("No job listings found."),
                ScrapeOutcome::Saved {
                    spreadsheet,
                    csv,
                    analyzed,
                } => println!(
                    "Results saved to {} and {} ({} listings analyzed).",
                    spreadsheet.display(),
                    csv.display(),
                    analyzed
                ),
            }

            Ok(())
        }
    }
}
