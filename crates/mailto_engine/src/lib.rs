//! Mailto engine: fetches storefront pages and collects their contact emails.
mod decode;
mod engine;
mod fetch;
mod filename;
mod page;
mod persist;
mod records;
mod types;
mod urls;

pub use decode::{decode_html, DecodedHtml};
pub use engine::{scrape_url, EngineConfig, EngineError, EngineHandle, DEFAULT_CONCURRENCY};
pub use fetch::{
    FetchSettings, FetchedPage, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT, PAGE_CONTENT_TYPES,
};
pub use filename::{run_timestamp, RunFiles};
pub use page::{parse_page, scrape_html, PageContent};
pub use persist::{ensure_output_dir, PersistError, ResultWriter};
pub use records::{domain_of, domain_records, DomainEmail};
pub use types::{JobId, JobOutcome, PageReport, ScrapeError};
pub use urls::{parse_url_list, read_url_list, UrlListError};
