use anyhow::{bail, Context, Result};
use chrono::Local;
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use log::LevelFilter;
use mailto_engine::{
    ensure_output_dir, read_url_list, run_timestamp, EngineHandle, JobOutcome, ResultWriter,
    RunFiles,
};

use crate::cli::Cli;
use crate::summary::RunResults;

pub fn run(cli: Cli) -> Result<()> {
    println!("Reading URLs from: {}", cli.urls_file.display());
    let urls = read_url_list(&cli.urls_file).context("reading URL list")?;
    if urls.is_empty() {
        bail!("No URLs found in the input file");
    }

    ensure_output_dir(&cli.output_dir)
        .with_context(|| format!("preparing {}", cli.output_dir.display()))?;
    let files = RunFiles::new(&run_timestamp(&Local::now()));
    engine_logging::initialize(
        cli.log,
        LevelFilter::Info,
        &cli.output_dir.join(&files.log),
    );

    let shown_dir = cli
        .output_dir
        .canonicalize()
        .unwrap_or_else(|_| cli.output_dir.clone());
    println!("Found {} URLs to process", urls.len());
    println!("Output files will be saved in: {}", shown_dir.display());
    println!("- Emails will be saved to: {}", files.emails);
    println!("- Domain records will be saved to: {}", files.records);
    println!("- Log will be saved to: {}", files.log);
    println!("Starting email extraction...");

    let engine = EngineHandle::new(cli.engine_config()).context("starting scrape engine")?;
    for (job_id, url) in (1..).zip(&urls) {
        engine.enqueue(job_id, url.as_str());
    }

    let mut results = RunResults::default();
    while results.completed() < urls.len() {
        let Some(outcome) = engine.recv() else {
            bail!("scrape engine stopped before finishing all pages");
        };
        log_page(&outcome);
        results.record(outcome.url, outcome.result);
    }

    let emails = results.all_emails();
    engine_info!(
        "Run finished: {} unique emails from {} of {} pages",
        emails.len(),
        results.pages_with_emails(),
        urls.len()
    );

    let writer = ResultWriter::new(cli.output_dir.clone());
    let emails_path = writer
        .write_emails(&files.emails, &emails)
        .context("writing email list")?;
    let records_path = writer
        .write_records(&files.records, &results.records())
        .context("writing domain records")?;

    println!();
    println!("Process completed:");
    println!("- {} unique emails have been found", emails.len());
    println!("- {} pages could not be fetched", results.failed().len());
    println!("- Results have been saved to '{}'", emails_path.display());
    println!("- Domain records are in '{}'", records_path.display());
    println!(
        "- Activity log is in '{}'",
        cli.output_dir.join(&files.log).display()
    );
    Ok(())
}

/// Writes everything about one page as a single block of the run log.
fn log_page(outcome: &JobOutcome) {
    let url = &outcome.url;
    engine_info!("Processing URL: {}", url);
    let report = match &outcome.result {
        Ok(report) => report,
        Err(err) => {
            engine_error!("Error processing {}: {}", url, err);
            return;
        }
    };

    if report.final_url.trim_end_matches('/') != url.trim_end_matches('/') {
        engine_info!("  Redirected to {}", report.final_url);
    }
    engine_debug!("  Decoded as {}", report.encoding);
    if report.lossy {
        engine_warn!("  Malformed {} byte sequences replaced", report.encoding);
    }
    for decision in &report.decisions {
        engine_info!("    {}", decision);
    }

    if report.emails.is_empty() {
        engine_info!("✗ No valid emails found in {}", url);
    } else {
        engine_info!("✓ Found {} valid emails in {}", report.emails.len(), url);
        for email in &report.emails {
            engine_info!("  ✓ {}", email);
        }
    }
}
