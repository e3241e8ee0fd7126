use std::collections::BTreeSet;

use mailto_engine::{domain_records, DomainEmail, PageReport, ScrapeError};

/// Results of one run, in completion order.
#[derive(Debug, Default)]
pub struct RunResults {
    pages: Vec<(String, Vec<String>)>,
    failed: Vec<(String, ScrapeError)>,
}

impl RunResults {
    pub fn record(&mut self, url: String, result: Result<PageReport, ScrapeError>) {
        match result {
            Ok(report) => self.pages.push((url, report.emails)),
            Err(err) => self.failed.push((url, err)),
        }
    }

    /// Union of every page's addresses.
    pub fn all_emails(&self) -> BTreeSet<String> {
        self.pages
            .iter()
            .flat_map(|(_, emails)| emails.iter().cloned())
            .collect()
    }

    pub fn records(&self) -> Vec<DomainEmail> {
        domain_records(&self.pages)
    }

    pub fn completed(&self) -> usize {
        self.pages.len() + self.failed.len()
    }

    pub fn failed(&self) -> &[(String, ScrapeError)] {
        &self.failed
    }

    pub fn pages_with_emails(&self) -> usize {
        self.pages
            .iter()
            .filter(|(_, emails)| !emails.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(emails: &[&str]) -> PageReport {
        PageReport {
            final_url: String::new(),
            encoding: "UTF-8".to_string(),
            lossy: false,
            emails: emails.iter().map(|email| email.to_string()).collect(),
            decisions: Vec::new(),
        }
    }

    #[test]
    fn merges_pages_and_counts_failures() {
        let mut results = RunResults::default();
        results.record(
            "https://a.myshopify.com".to_string(),
            Ok(report(&["info@a.com", "sales@a.com"])),
        );
        results.record(
            "https://b.myshopify.com".to_string(),
            Err(ScrapeError::HttpStatus(404)),
        );
        results.record("https://www.c.com".to_string(), Ok(report(&["info@a.com"])));
        results.record("https://d.com".to_string(), Ok(report(&[])));

        assert_eq!(results.completed(), 4);
        assert_eq!(results.pages_with_emails(), 2);
        assert_eq!(results.failed().len(), 1);
        assert_eq!(
            results.all_emails().into_iter().collect::<Vec<_>>(),
            vec!["info@a.com".to_string(), "sales@a.com".to_string()]
        );

        let domains: Vec<String> = results.records().into_iter().map(|r| r.domain).collect();
        assert_eq!(domains, vec!["a.myshopify.com", "a.myshopify.com", "c.com"]);
    }
}
