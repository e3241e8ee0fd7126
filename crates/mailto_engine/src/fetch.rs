use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response, Url};

use crate::ScrapeError;

/// Browser-like agent string sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Media types scanned for addresses. A response without a content type is
/// scanned as well.
pub const PAGE_CONTENT_TYPES: [&str; 3] = ["text/html", "application/xhtml+xml", "text/plain"];

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_redirects: usize,
    /// Pages above this size are skipped, not truncated.
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            max_redirects: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// A page body that passed status, type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

/// Fetches pages through one shared client and connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    max_redirects: usize,
    max_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .build()?;
        Ok(Self {
            client,
            max_redirects: settings.max_redirects,
            max_bytes: settings.max_bytes,
        })
    }

    fn classify(&self, err: reqwest::Error) -> ScrapeError {
        if err.is_timeout() {
            ScrapeError::Timeout
        } else if err.is_redirect() {
            ScrapeError::TooManyRedirects(self.max_redirects)
        } else {
            ScrapeError::Network(err.to_string())
        }
    }

    async fn read_body(&self, mut response: Response) -> Result<Vec<u8>, ScrapeError> {
        let too_large = ScrapeError::TooLarge {
            limit: self.max_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(too_large);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|err| self.classify(err))? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(too_large);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let url = Url::parse(url).map_err(|err| ScrapeError::InvalidUrl(err.to_string()))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if let Some(media) = content_type.as_deref().map(media_type) {
            if !PAGE_CONTENT_TYPES
                .iter()
                .any(|page| page.eq_ignore_ascii_case(media))
            {
                return Err(ScrapeError::UnsupportedContentType(media.to_string()));
            }
        }

        let final_url = response.url().to_string();
        let body = self.read_body(response).await?;
        Ok(FetchedPage {
            final_url,
            content_type,
            body,
        })
    }
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}
