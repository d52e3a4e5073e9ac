// src/config/options.rs
use std::{fmt, fs, path::{Path, PathBuf}, str::FromStr, time::Duration};

use serde::Deserialize;

use super::consts::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub server: ServerOptions,
    /// Extra append-only log file; stderr logging is always on.
    pub log_file: Option<PathBuf>,
}

impl AppOptions {
    /// Defaults, then the TOML file (if any), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut opts = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        opts.apply_env(|k| std::env::var(k).ok());
        Ok(opts)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&text)
            .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })
    }

    /// `lookup` stands in for `std::env::var` so tests need not touch the process env.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(url) = lookup("MEMBERS_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.scrape.base_url = url;
        }
        if let Some(p) = lookup("MEMBER_TYPES_PATH").filter(|v| !v.trim().is_empty()) {
            self.scrape.member_types = Some(PathBuf::from(p));
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub members_path: String,
    /// Total attempts per URL.
    pub max_retries: u32,
    pub retry_base_ms: u64,
    /// Pause after each successful profile-page fetch.
    pub request_pause_ms: u64,
    pub timeout_secs: u64,
    /// TOML role table replacing the built-in one.
    pub member_types: Option<PathBuf>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            members_path: MEMBERS_PATH.into(),
            max_retries: MAX_RETRIES,
            retry_base_ms: RETRY_BASE_MS,
            request_pause_ms: REQUEST_PAUSE_MS,
            timeout_secs: TIMEOUT_SECS,
            member_types: None,
        }
    }
}

impl ScrapeOptions {
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn members_url(&self) -> String {
        let path = self.members_path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base(), path)
        } else {
            format!("{}/{}", self.base(), path)
        }
    }

    pub fn request_pause(&self) -> Duration { Duration::from_millis(self.request_pause_ms) }
    pub fn retry_base(&self) -> Duration { Duration::from_millis(self.retry_base_ms) }
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for tabular formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Tsv => "text/tab-separated-values; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub formats: Vec<ExportFormat>,
    pub out_dir: PathBuf,
    /// File name without extension; the format decides the extension.
    pub file_stem: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Csv, ExportFormat::Json],
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: DEFAULT_FILE.into(),
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self, format: ExportFormat) -> PathBuf {
        self.out_dir.join(format!("{}.{}", self.file_stem, format.ext()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.into(), port: DEFAULT_PORT }
    }
}

impl ServerOptions {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn members_url_joins_base_and_path() {
        let mut s = ScrapeOptions::default();
        s.base_url = "https://example.org/".into();
        s.members_path = "/members?_active=false".into();
        assert_eq!(s.members_url(), "https://example.org/members?_active=false");

        s.members_path = "directory".into();
        assert_eq!(s.members_url(), "https://example.org/directory");
    }

    #[test]
    fn env_overrides_port_and_base_url() {
        let env: HashMap<&str, &str> =
            [("PORT", "8088"), ("MEMBERS_BASE_URL", "https://dir.test")].into_iter().collect();
        let mut opts = AppOptions::default();
        opts.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(opts.server.port, 8088);
        assert_eq!(opts.scrape.base_url, "https://dir.test");
        assert_eq!(opts.server.host, DEFAULT_HOST);
    }

    #[test]
    fn unparsable_port_keeps_default() {
        let mut opts = AppOptions::default();
        opts.apply_env(|k| (k == "PORT").then(|| "eighty".to_string()));
        assert_eq!(opts.server.port, DEFAULT_PORT);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let opts: AppOptions = toml::from_str(
            r#"
            [scrape]
            request_pause_ms = 0

            [export]
            formats = ["tsv"]
            "#,
        )
        .unwrap();
        assert_eq!(opts.scrape.request_pause_ms, 0);
        assert_eq!(opts.scrape.base_url, BASE_URL);
        assert_eq!(opts.export.formats, vec![ExportFormat::Tsv]);
        assert_eq!(opts.export.out_path(ExportFormat::Tsv), PathBuf::from("out/members.tsv"));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
