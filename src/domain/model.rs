use crate::utils::error::{Result, SitemapError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// How often a page is expected to change (`<changefreq>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeFrequency {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(SitemapError::InvalidConfigValueError {
                field: "changefreq".to_string(),
                value: s.to_string(),
                reason: "Expected one of always, hourly, daily, weekly, monthly, yearly, never"
                    .to_string(),
            }),
        }
    }
}

/// Who may view a route. Only `Public` routes are indexable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Authenticated,
    Student,
    Teacher,
}

impl Access {
    pub fn is_indexable(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Parses `lastmod` values: RFC 3339 timestamps or plain `YYYY-MM-DD` dates.
pub fn parse_lastmod(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_lastmod<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_lastmod(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid lastmod '{}', expected RFC 3339 or YYYY-MM-DD",
                value
            ))
        }),
    }
}

/// A page as declared by a source, before canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(default, deserialize_with = "deserialize_lastmod")]
    pub lastmod: Option<DateTime<Utc>>,
    #[serde(default)]
    pub changefreq: Option<ChangeFrequency>,
    #[serde(default)]
    pub priority: Option<f32>,
    #[serde(default)]
    pub access: Option<Access>,
}

impl RouteEntry {
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
            access: None,
        }
    }

    pub fn gated(path: impl Into<String>, access: Access) -> Self {
        Self {
            access: Some(access),
            ..Self::public(path)
        }
    }

    pub fn with_changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    pub fn access(&self) -> Access {
        self.access.unwrap_or_default()
    }
}

/// A resolved `<url>` entry: canonical location plus optional hints.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub loc: Url,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f32>,
}

/// Fallback hints applied to entries that do not set their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDefaults {
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f32>,
    #[serde(default)]
    pub lastmod_now: bool,
}

/// One `[[content]]` block: a JSON list served over HTTP that maps to pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSourceConfig {
    pub name: String,
    pub endpoint: String,
    pub path_template: String,
    pub items_pointer: Option<String>,
    pub lastmod_field: Option<String>,
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f32>,
    pub access: Option<Access>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl ContentSourceConfig {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        path_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            path_template: path_template.into(),
            items_pointer: None,
            lastmod_field: None,
            changefreq: None,
            priority: None,
            access: None,
            timeout_seconds: None,
            headers: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    UrlSet,
    Index,
    Robots,
}

/// A rendered file ready to be written to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub name: String,
    pub kind: OutputKind,
    pub url_count: usize,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct BuildResult {
    pub files: Vec<OutputFile>,
    pub index_file: String,
    pub url_count: usize,
    pub excluded_count: usize,
    pub duplicate_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub output_path: String,
    pub index_file: String,
    pub url_count: usize,
    pub files_written: Vec<String>,
    pub files_unchanged: Vec<String>,
    pub excluded_count: usize,
    pub duplicate_count: usize,
}

impl GenerationReport {
    pub fn file_count(&self) -> usize {
        self.files_written.len() + self.files_unchanged.len()
    }
}
