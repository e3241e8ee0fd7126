use std::collections::BTreeSet;

/// Extensions accepted by default.
///
/// Generic TLDs, the country codes of the markets the pipeline targets
/// (Spain, Europe, the UK and neighbours), and the newer gTLDs storefronts
/// commonly use. This is a policy table, not a list of every delegated TLD.
pub const DEFAULT_TLDS: &[&str] = &[
    // generic
    "com", "org", "net", "edu", "gov", "mil", "int",
    // country codes
    "es", "eu", "uk", "de", "fr", "it", "pt", "nl",
    // widely used short gTLDs and ccTLDs
    "info", "biz", "io", "co", "me", "tv", "app", "dev",
    // newer gTLDs
    "cloud", "online", "store", "shop", "tech", "cat", "pro", "xyz", "site", "web", "blog",
];

/// Set of top-level extensions an address domain may end with.
///
/// Lookups are case-insensitive; entries are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldAllowList {
    extensions: BTreeSet<String>,
}

impl TldAllowList {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Returns a copy of this list with `extra` extensions added.
    pub fn extended<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions.extend(
            extra
                .into_iter()
                .map(|ext| normalize(ext.as_ref()))
                .filter(|ext| !ext.is_empty()),
        );
        self
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_ascii_lowercase())
    }

    /// True when the last dot-separated label of `domain` is allowed.
    pub fn allows_domain(&self, domain: &str) -> bool {
        domain
            .rsplit('.')
            .next()
            .is_some_and(|ext| self.contains(ext))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for TldAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_TLDS.iter().copied())
    }
}

// Accepts both "io" and ".io".
fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
