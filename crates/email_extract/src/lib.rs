//! Email extraction engine: finds contact addresses in scraped page content.
//!
//! Candidates go through `clean -> trim_domain -> strict_validate ->
//! grammar_validate`; each stage returns an [`Outcome`]. Nothing in this crate
//! fails: malformed input yields an empty result.
mod clean;
mod domain;
mod extractor;
mod outcome;
mod sink;
mod tld;
mod validate;

use std::collections::BTreeSet;
use std::sync::LazyLock;

pub use clean::clean;
pub use domain::{trim_domain, MAX_DOMAIN_LEN};
pub use extractor::EmailExtractor;
pub use outcome::{Outcome, Rejection};
pub use sink::{Decision, DecisionLog, DecisionSink, LogSink, NoopSink};
pub use tld::{TldAllowList, DEFAULT_TLDS};
pub use validate::{grammar_validate, strict_validate};

static DEFAULT_EXTRACTOR: LazyLock<EmailExtractor> = LazyLock::new(EmailExtractor::default);

/// [`EmailExtractor::extract_emails`] with the default allow-list.
pub fn extract_emails(text: &str) -> Vec<String> {
    DEFAULT_EXTRACTOR.extract_emails(text)
}

/// [`EmailExtractor::extract_emails_from_mailto`] with the default allow-list.
pub fn extract_emails_from_mailto<I, S>(hrefs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_EXTRACTOR.extract_emails_from_mailto(hrefs)
}

/// [`EmailExtractor::is_valid_email`] with the default allow-list.
pub fn is_valid_email(candidate: &str) -> bool {
    DEFAULT_EXTRACTOR.is_valid_email(candidate)
}

/// [`EmailExtractor::extract_all`] with the default allow-list.
pub fn extract_all<I, S>(text: &str, mailto_hrefs: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_EXTRACTOR.extract_all(text, mailto_hrefs)
}
