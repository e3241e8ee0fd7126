use std::fmt;
use std::sync::Mutex;

use engine_logging::engine_info;

use crate::Rejection;

/// A single accept/clean/reject decision taken while extracting emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The domain was shortened to recover a valid address.
    DomainTrimmed { from: String, to: String },
    /// A syntactically valid domain ended with an extension outside the allow-list.
    ExtensionRejected { domain: String },
    /// Found in text, accepted as is.
    Found { email: String },
    /// Found in text after cleaning or trimming.
    CleanedAndAccepted { from: String, to: String },
    /// Found in a `mailto:` href.
    FoundInMailto { email: String },
    Discarded { candidate: String, reason: Rejection },
    DiscardedFromMailto { candidate: String, reason: Rejection },
    /// Dropped because it contains the shorter `inner` address.
    Contained { email: String, inner: String },
    /// Survived containment filtering.
    Accepted { email: String },
}

/// Observer for extraction decisions. Has no influence on the result.
pub trait DecisionSink: Send + Sync {
    fn record(&self, decision: Decision);
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::DomainTrimmed { from, to } => write!(f, "ℹ Domain cleaned: {from} -> {to}"),
            Decision::ExtensionRejected { domain } => {
                write!(f, "ℹ Invalid domain extension: {domain}")
            }
            Decision::Found { email } => write!(f, "✓ Found: {email}"),
            Decision::CleanedAndAccepted { from, to } => {
                write!(f, "✓ Cleaned and accepted: {from} -> {to}")
            }
            Decision::FoundInMailto { email } => write!(f, "✓ Found in mailto: {email}"),
            Decision::Discarded { candidate, reason } => {
                write!(f, "✗ Discarded ({reason}): {candidate}")
            }
            Decision::DiscardedFromMailto { candidate, reason } => {
                write!(f, "✗ Discarded from mailto ({reason}): {candidate}")
            }
            Decision::Contained { email, inner } => {
                write!(f, "✗ Discarded (contains {inner}): {email}")
            }
            Decision::Accepted { email } => write!(f, "✓ Accepted: {email}"),
        }
    }
}

/// Writes every decision to the global logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DecisionSink for LogSink {
    fn record(&self, decision: Decision) {
        engine_info!("    {}", decision);
    }
}

/// Keeps decisions in memory so a caller can report them as one block.
#[derive(Debug, Default)]
pub struct DecisionLog {
    decisions: Mutex<Vec<Decision>>,
}

impl DecisionLog {
    /// Removes and returns everything recorded so far, oldest first.
    pub fn take(&self) -> Vec<Decision> {
        match self.decisions.lock() {
            Ok(mut decisions) => std::mem::take(&mut *decisions),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DecisionSink for DecisionLog {
    fn record(&self, decision: Decision) {
        match self.decisions.lock() {
            Ok(mut decisions) => decisions.push(decision),
            Err(poisoned) => poisoned.into_inner().push(decision),
        }
    }
}

/// Drops every decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DecisionSink for NoopSink {
    fn record(&self, _decision: Decision) {}
}
