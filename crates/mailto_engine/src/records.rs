use serde::{Deserialize, Serialize};
use url::Url;

/// One address found on a storefront, as consumed by the outreach stage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DomainEmail {
    pub domain: String,
    pub email: String,
}

/// Host of `url` without a leading `www.`, or the trimmed input when it does
/// not parse as an absolute URL.
pub fn domain_of(url: &str) -> String {
    let host = Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase));
    match host {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => url.trim().to_string(),
    }
}

/// One record per (page, email) pair, sorted and deduplicated.
pub fn domain_records(pages: &[(String, Vec<String>)]) -> Vec<DomainEmail> {
    let mut records: Vec<DomainEmail> = pages
        .iter()
        .flat_map(|(url, emails)| {
            let domain = domain_of(url);
            emails.iter().map(move |email| DomainEmail {
                domain: domain.clone(),
                email: email.clone(),
            })
        })
        .collect();
    records.sort();
    records.dedup();
    records
}
