use chrono::{DateTime, TimeZone};

/// Timestamp used in every file name of one run, e.g. `20260117_093015`.
pub fn run_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Names of the files a run writes into its output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    pub emails: String,
    pub log: String,
    pub records: String,
}

impl RunFiles {
    pub fn new(timestamp: &str) -> Self {
        Self {
            emails: format!("found_emails_{timestamp}.txt"),
            log: format!("scraping_results_{timestamp}.log"),
            records: format!("domain_emails_{timestamp}.json"),
        }
    }
}
