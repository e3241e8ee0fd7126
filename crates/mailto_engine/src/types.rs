use email_extract::Decision;
use thiserror::Error;

pub type JobId = u64;

/// Sent exactly once for every enqueued URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job_id: JobId,
    pub url: String,
    pub result: Result<PageReport, ScrapeError>,
}

/// What one storefront page yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Address after redirects.
    pub final_url: String,
    pub encoding: String,
    /// Malformed byte sequences were replaced while decoding.
    pub lossy: bool,
    /// Containment-filtered, sorted.
    pub emails: Vec<String>,
    /// Extraction decisions for this page, oldest first.
    pub decisions: Vec<Decision>,
}

/// Why a page produced no report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timed out")]
    Timeout,
    #[error("more than {0} redirects")]
    TooManyRedirects(usize),
    #[error("page larger than {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("not a page: {0}")]
    UnsupportedContentType(String),
    #[error("network error: {0}")]
    Network(String),
}
