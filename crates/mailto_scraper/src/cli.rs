use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use email_extract::{EmailExtractor, TldAllowList};
use engine_logging::LogDestination;
use mailto_engine::{EngineConfig, FetchSettings, DEFAULT_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(
    name = "mailto_scraper",
    about = "Extract email addresses from a list of websites"
)]
pub struct Cli {
    /// Text file containing URLs to process (one per line, `#` for comments).
    pub urls_file: PathBuf,

    /// Directory where output files will be saved.
    #[arg(short, long, env = "MAILTO_SCRAPER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Pages fetched at the same time.
    #[arg(long, env = "MAILTO_SCRAPER_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Connect and request timeout per page, in seconds.
    #[arg(long, env = "MAILTO_SCRAPER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Pages larger than this are skipped.
    #[arg(long, env = "MAILTO_SCRAPER_MAX_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub max_bytes: u64,

    /// Extra top-level extension to accept, on top of the built-in list.
    /// Repeatable: `--allow-tld ca --allow-tld au`.
    #[arg(long = "allow-tld", value_name = "EXT")]
    pub allow_tld: Vec<String>,

    /// Where log lines go: `file`, `terminal` or `both`.
    #[arg(
        long,
        env = "MAILTO_SCRAPER_LOG",
        default_value = "file",
        value_parser = parse_log_destination
    )]
    pub log: LogDestination,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        let timeout = Duration::from_secs(self.timeout_secs);
        let fetch = FetchSettings {
            connect_timeout: timeout,
            request_timeout: timeout,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        let tlds = TldAllowList::default().extended(&self.allow_tld);
        EngineConfig {
            fetch,
            concurrency: self.concurrency,
            extractor: EmailExtractor::with_tlds(tlds),
        }
    }
}

fn parse_log_destination(value: &str) -> Result<LogDestination, String> {
    LogDestination::parse(value)
        .ok_or_else(|| format!("unknown log destination '{value}' (expected file, terminal or both)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_a_plain_run() {
        let cli = Cli::try_parse_from(["mailto_scraper", "urls.txt"]).unwrap();
        assert_eq!(cli.urls_file, PathBuf::from("urls.txt"));
        assert_eq!(cli.log, LogDestination::File);

        let config = cli.engine_config();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(10));
        assert!(!config.extractor.tlds().contains("ca"));
    }

    #[test]
    fn flags_override_engine_settings() {
        let cli = Cli::try_parse_from([
            "mailto_scraper",
            "urls.txt",
            "-o",
            "out",
            "--concurrency",
            "8",
            "--timeout-secs",
            "3",
            "--allow-tld",
            "ca",
            "--allow-tld",
            ".AU",
            "--log",
            "Both",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.log, LogDestination::Both);

        let config = cli.engine_config();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(3));
        assert!(config.extractor.tlds().contains("ca"));
        assert!(config.extractor.tlds().contains("au"));
        assert!(config.extractor.is_valid_email("info@shop.ca"));
    }

    #[test]
    fn unknown_log_destination_is_an_error() {
        assert!(Cli::try_parse_from(["mailto_scraper", "urls.txt", "--log", "syslog"]).is_err());
    }
}
