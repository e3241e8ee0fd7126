use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::validate::{format_check, grammar_validate};
use crate::{clean, trim_domain, Decision, DecisionSink, LogSink, Outcome, Rejection, TldAllowList};

/// Deliberately broad: the extension class also takes punctuation so that
/// text glued to the end of an address is captured and trimmed afterwards.
static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z0-9._%+-]+").unwrap()
});

const MAILTO_PREFIX: &str = "mailto:";

/// Finds and validates email addresses in scraped page content.
///
/// Stateless between calls and shareable across threads; every call works
/// only on its own input.
#[derive(Clone)]
pub struct EmailExtractor {
    tlds: TldAllowList,
    sink: Arc<dyn DecisionSink>,
}

impl EmailExtractor {
    pub fn new(tlds: TldAllowList, sink: Arc<dyn DecisionSink>) -> Self {
        Self { tlds, sink }
    }

    /// Extractor with a custom allow-list that logs its decisions.
    pub fn with_tlds(tlds: TldAllowList) -> Self {
        Self::new(tlds, Arc::new(LogSink))
    }

    /// Same allow-list, decisions reported to `sink` instead.
    pub fn with_sink(&self, sink: Arc<dyn DecisionSink>) -> Self {
        Self::new(self.tlds.clone(), sink)
    }

    pub fn tlds(&self) -> &TldAllowList {
        &self.tlds
    }

    /// Full pipeline for one candidate: clean, trim the domain, then the strict
    /// and RFC grammar checks. The accepted value is the trimmed address.
    pub fn validate(&self, candidate: &str) -> Outcome {
        format_check(candidate, &self.tlds, self.sink.as_ref()).and_then(grammar_validate)
    }

    /// True when `candidate` cleans and trims into an address that passes both
    /// the strict and the RFC grammar checks.
    pub fn is_valid_email(&self, candidate: &str) -> bool {
        self.validate(candidate).is_accepted()
    }

    /// All valid addresses found in `text`, longest first.
    ///
    /// An address that contains another, shorter address from the same text
    /// is treated as scraping noise around the shorter one and dropped.
    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        let sink = self.sink.as_ref();
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for m in CANDIDATE.find_iter(text) {
            let cleaned = clean(m.as_str());
            // Decoding can turn `%20` into spaces; each word is its own candidate.
            for word in cleaned.split_whitespace().filter(|w| w.contains('@')) {
                let Some(trimmed) = trim_domain(word, &self.tlds, sink).accepted() else {
                    continue;
                };
                if !seen.insert(trimmed.clone()) {
                    continue;
                }
                match self.validate(&trimmed) {
                    Outcome::Accepted(email) => {
                        if email != m.as_str() {
                            sink.record(Decision::CleanedAndAccepted {
                                from: m.as_str().to_string(),
                                to: email.clone(),
                            });
                        } else {
                            sink.record(Decision::Found {
                                email: email.clone(),
                            });
                        }
                        found.push(email);
                    }
                    Outcome::Rejected(reason) => sink.record(Decision::Discarded {
                        candidate: trimmed,
                        reason,
                    }),
                }
            }
        }

        let kept = drop_contained(found, sink);
        for email in &kept {
            sink.record(Decision::Accepted {
                email: email.clone(),
            });
        }
        kept
    }

    /// Valid addresses from raw `href` values, in input order.
    ///
    /// Values without the `mailto:` scheme are ignored. Header fields after
    /// `?` are dropped and comma-separated recipients are checked one by one.
    pub fn extract_emails_from_mailto<I, S>(&self, hrefs: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sink = self.sink.as_ref();
        let mut emails: Vec<String> = Vec::new();

        for href in hrefs {
            let href = href.as_ref().trim();
            let Some(target) = strip_mailto(href) else {
                sink.record(Decision::DiscardedFromMailto {
                    candidate: href.to_string(),
                    reason: Rejection::NotMailto,
                });
                continue;
            };
            let recipients = target.split('?').next().unwrap_or_default();

            for recipient in recipients.split(',') {
                let candidate = clean(recipient);
                if candidate.is_empty() {
                    continue;
                }
                match self.validate(&candidate) {
                    Outcome::Accepted(email) => {
                        sink.record(Decision::FoundInMailto {
                            email: email.clone(),
                        });
                        if !emails.contains(&email) {
                            emails.push(email);
                        }
                    }
                    Outcome::Rejected(reason) => sink.record(Decision::DiscardedFromMailto {
                        candidate,
                        reason,
                    }),
                }
            }
        }

        emails
    }

    /// Page-level result: addresses from the text and from the mailto links,
    /// containment-filtered across both sources.
    pub fn extract_all<I, S>(&self, text: &str, mailto_hrefs: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut merged = self.extract_emails(text);
        for email in self.extract_emails_from_mailto(mailto_hrefs) {
            if !merged.contains(&email) {
                merged.push(email);
            }
        }
        drop_contained(merged, self.sink.as_ref())
            .into_iter()
            .collect()
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::with_tlds(TldAllowList::default())
    }
}

fn strip_mailto(href: &str) -> Option<&str> {
    let prefix = href.get(..MAILTO_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(MAILTO_PREFIX) {
        Some(&href[MAILTO_PREFIX.len()..])
    } else {
        None
    }
}

/// Containment filter, longest first.
///
/// Drops every address that contains a strictly shorter one from `emails`
/// (case-insensitive), then any case-only duplicate of an address already
/// kept. Ties keep their input order.
fn drop_contained(mut emails: Vec<String>, sink: &dyn DecisionSink) -> Vec<String> {
    emails.sort_by(|a, b| b.len().cmp(&a.len()));
    let lowered: Vec<String> = emails.iter().map(|e| e.to_lowercase()).collect();
    let mut kept: Vec<String> = Vec::with_capacity(emails.len());

    for (email, lower) in emails.iter().zip(&lowered) {
        let inner = emails
            .iter()
            .zip(&lowered)
            .find(|(_, other)| other.len() < lower.len() && lower.contains(other.as_str()))
            .map(|(other, _)| other)
            .or_else(|| kept.iter().find(|k| &k.to_lowercase() == lower));
        if let Some(inner) = inner {
            sink.record(Decision::Contained {
                email: email.clone(),
                inner: inner.clone(),
            });
            continue;
        }
        kept.push(email.clone());
    }

    kept
}
