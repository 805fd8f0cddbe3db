// src/export.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::scraping::AnalyzedJob;

/// Fixed export column order, shared by the spreadsheet and the CSV.
pub const COLUMNS: [&str; 13] = [
    "Priority",
    "Title",
    "Company",
    "Location",
    "Brief_Description",
    "Skills_Match",
    "Salary",
    "Remote_Work",
    "Seniority_Level",
    "Language",
    "Date_Posted",
    "Link",
    "Description",
];

/// Write the analyzed collection as a spreadsheet and a CSV with identical
/// rows, filenames stamped at write time. Returns both paths.
pub fn save_results(jobs: &[AnalyzedJob], output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let spreadsheet_path = output_dir.join(format!("job_listings_analysis_{}.xlsx", stamp));
    let csv_path = spreadsheet_path.with_extension("csv");

    write_spreadsheet(jobs, &spreadsheet_path)?;
    write_csv(jobs, &csv_path)?;

    info!(
        "Saved {} analyzed listing(s) to {} and {}",
        jobs.len(),
        spreadsheet_path.display(),
        csv_path.display()
    );
    log_priority_stats(jobs);

    Ok((spreadsheet_path, csv_path))
}

fn row(job: &AnalyzedJob) -> [String; 13] {
    [
        job.priority.to_string(),
        job.listing.title.clone(),
        job.listing.company.clone(),
        job.listing.location.clone(),
        job.brief_description.clone(),
        job.skills_match.clone(),
        job.detail.salary.clone(),
        job.remote_work.to_string(),
        job.seniority.as_str().to_string(),
        job.language.as_str().to_string(),
        job.listing.date_posted.clone(),
        job.listing.link.clone(),
        job.detail.description.clone(),
    ]
}

fn write_spreadsheet(jobs: &[AnalyzedJob], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .context("Failed to write spreadsheet header")?;
    }

    for (index, job) in jobs.iter().enumerate() {
        for (col, value) in row(job).iter().enumerate() {
            worksheet
                .write_string(index as u32 + 1, col as u16, value)
                .context("Failed to write spreadsheet row")?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save spreadsheet: {}", path.display()))?;

    Ok(())
}

fn write_csv(jobs: &[AnalyzedJob], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;

    for job in jobs {
        writer
            .write_record(row(job))
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

fn log_priority_stats(jobs: &[AnalyzedJob]) {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for job in jobs {
        *counts.entry(job.priority).or_default() += 1;
    }

    for (priority, count) in counts {
        let name = match priority {
            1 => "high",
            2 => "medium",
            _ => "low",
        };
        info!("Priority {} ({}): {} listing(s)", priority, name, count);
    }
}
