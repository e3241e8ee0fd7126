use std::fmt;

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    MissingAt,
    MultipleAt,
    DomainWithoutDot,
    /// Trimming removed every `.` before a valid, allowed domain was found.
    DomainExhausted,
    StrictFormat,
    AddressGrammar,
    NotMailto,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingAt => write!(f, "missing @"),
            Rejection::MultipleAt => write!(f, "more than one @"),
            Rejection::DomainWithoutDot => write!(f, "domain has no dot"),
            Rejection::DomainExhausted => write!(f, "no valid domain after trimming"),
            Rejection::StrictFormat => write!(f, "invalid format"),
            Rejection::AddressGrammar => write!(f, "invalid email format"),
            Rejection::NotMailto => write!(f, "not a mailto link"),
        }
    }
}

/// Result of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(String),
    Rejected(Rejection),
}

impl Outcome {
    /// Feeds an accepted value into the next stage; rejections pass through.
    pub fn and_then(self, stage: impl FnOnce(String) -> Outcome) -> Outcome {
        match self {
            Outcome::Accepted(value) => stage(value),
            rejected @ Outcome::Rejected(_) => rejected,
        }
    }

    pub fn accepted(self) -> Option<String> {
        match self {
            Outcome::Accepted(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }
}
