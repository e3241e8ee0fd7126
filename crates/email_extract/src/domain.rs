use std::sync::LazyLock;

use regex::Regex;

use crate::{Decision, DecisionSink, Outcome, Rejection, TldAllowList};

static STRICT_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Longest domain a mail address can carry (RFC 1035 name limit).
pub const MAX_DOMAIN_LEN: usize = 253;

/// Shortens the domain of `candidate` from the right until it is valid.
///
/// A domain is valid when it matches `[A-Za-z0-9.-]+\.[A-Za-z]{2,}` and its
/// last label is in `tlds`. This recovers addresses whose domain was glued to
/// the following word on the page (`example.comabout` -> `example.com`).
/// Only the first [`MAX_DOMAIN_LEN`] bytes of the domain are considered.
/// Trimming fails once the last `.` has been removed.
pub fn trim_domain(candidate: &str, tlds: &TldAllowList, sink: &dyn DecisionSink) -> Outcome {
    let mut parts = candidate.split('@');
    let (Some(local), Some(original)) = (parts.next(), parts.next()) else {
        return Outcome::Rejected(Rejection::MissingAt);
    };
    if parts.next().is_some() {
        return Outcome::Rejected(Rejection::MultipleAt);
    }
    if !original.contains('.') {
        return Outcome::Rejected(Rejection::DomainWithoutDot);
    }

    let original = cap_domain(original);
    let mut domain = original.to_string();
    while !domain.is_empty() {
        if STRICT_DOMAIN.is_match(&domain) {
            if tlds.allows_domain(&domain) {
                if domain != original {
                    sink.record(Decision::DomainTrimmed {
                        from: original.to_string(),
                        to: domain.clone(),
                    });
                }
                return Outcome::Accepted(format!("{local}@{domain}"));
            }
            sink.record(Decision::ExtensionRejected {
                domain: domain.clone(),
            });
        }

        domain.pop();
        if !domain.contains('.') {
            break;
        }
    }

    Outcome::Rejected(Rejection::DomainExhausted)
}

fn cap_domain(domain: &str) -> &str {
    if domain.len() <= MAX_DOMAIN_LEN {
        return domain;
    }
    let mut end = MAX_DOMAIN_LEN;
    while !domain.is_char_boundary(end) {
        end -= 1;
    }
    &domain[..end]
}
