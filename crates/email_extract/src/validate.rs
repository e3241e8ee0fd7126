use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;

use crate::{clean, trim_domain, DecisionSink, Outcome, Rejection, TldAllowList};

static STRICT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Anchored match of the whole address against the strict grammar.
pub fn strict_validate(email: String) -> Outcome {
    if STRICT_EMAIL.is_match(&email) {
        Outcome::Accepted(email)
    } else {
        Outcome::Rejected(Rejection::StrictFormat)
    }
}

/// RFC 5322 syntax check of the address, without any DNS lookup.
///
/// Catches what the strict grammar lets through, such as empty dot-atoms in
/// the local part or an over-long local part.
pub fn grammar_validate(email: String) -> Outcome {
    if EmailAddress::is_valid(&email) {
        Outcome::Accepted(email)
    } else {
        Outcome::Rejected(Rejection::AddressGrammar)
    }
}

/// `clean -> trim_domain -> strict_validate`, yielding the trimmed address.
pub(crate) fn format_check(candidate: &str, tlds: &TldAllowList, sink: &dyn DecisionSink) -> Outcome {
    trim_domain(&clean(candidate), tlds, sink).and_then(strict_validate)
}
