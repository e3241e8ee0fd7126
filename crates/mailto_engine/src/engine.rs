use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use email_extract::{DecisionLog, EmailExtractor};
use engine_logging::engine_debug;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::decode::decode_html;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::page::scrape_html;
use crate::{JobId, JobOutcome, PageReport, ScrapeError};

pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    /// Pages fetched at the same time.
    pub concurrency: usize,
    pub extractor: EmailExtractor,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            concurrency: DEFAULT_CONCURRENCY,
            extractor: EmailExtractor::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

struct Job {
    id: JobId,
    url: String,
}

/// Runs scrape jobs on a background tokio runtime.
///
/// Every enqueued job yields exactly one [`JobOutcome`], in completion order.
/// Dropping the handle stops the runtime and abandons unfinished jobs.
pub struct EngineHandle {
    job_tx: mpsc::Sender<Job>,
    outcome_rx: mpsc::Receiver<JobOutcome>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch)?);
        Ok(Self::with_fetcher(
            fetcher,
            config.extractor,
            config.concurrency,
        )?)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        extractor: EmailExtractor,
        concurrency: usize,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let extractor = Arc::new(extractor);
        let permits = Arc::new(Semaphore::new(concurrency.max(1)));

        thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                let fetcher = fetcher.clone();
                let extractor = extractor.clone();
                let permits = permits.clone();
                let outcome_tx = outcome_tx.clone();
                runtime.spawn(async move {
                    // The semaphore is never closed.
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return;
                    };
                    engine_debug!("job {}: fetching {}", job.id, job.url);
                    let result = scrape_url(fetcher.as_ref(), &extractor, &job.url).await;
                    let _ = outcome_tx.send(JobOutcome {
                        job_id: job.id,
                        url: job.url,
                        result,
                    });
                });
            }
        });

        Ok(Self { job_tx, outcome_rx })
    }

    pub fn enqueue(&self, job_id: JobId, url: impl Into<String>) {
        let _ = self.job_tx.send(Job {
            id: job_id,
            url: url.into(),
        });
    }

    /// Blocks until the next job finishes; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<JobOutcome> {
        self.outcome_rx.recv().ok()
    }
}

/// Fetch, decode and extract one page.
///
/// Extraction decisions are collected into the report instead of the log.
pub async fn scrape_url(
    fetcher: &dyn Fetcher,
    extractor: &EmailExtractor,
    url: &str,
) -> Result<PageReport, ScrapeError> {
    let page = fetcher.fetch(url).await?;
    let decoded = decode_html(&page.body, page.content_type.as_deref());

    let decisions = Arc::new(DecisionLog::default());
    let extractor = extractor.with_sink(decisions.clone());
    let emails = scrape_html(&decoded.html, &extractor).into_iter().collect();

    Ok(PageReport {
        final_url: page.final_url,
        encoding: decoded.encoding_label,
        lossy: decoded.had_errors,
        emails,
        decisions: decisions.take(),
    })
}
