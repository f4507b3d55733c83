use crate::domain::model::{parse_lastmod, ContentSourceConfig, RouteEntry};
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, SitemapError};
use async_trait::async_trait;
use regex::{Captures, Regex};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Routes known ahead of time (configuration or the built-in route table).
pub struct StaticRoutes {
    name: String,
    routes: Vec<RouteEntry>,
}

impl StaticRoutes {
    pub fn new(name: impl Into<String>, routes: Vec<RouteEntry>) -> Self {
        Self {
            name: name.into(),
            routes,
        }
    }
}

#[async_trait]
impl PageSource for StaticRoutes {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_routes(&self) -> Result<Vec<RouteEntry>> {
        Ok(self.routes.clone())
    }
}

/// A CSV file with `path,changefreq,priority,lastmod,access` columns.
pub struct CsvRouteFile {
    path: PathBuf,
}

impl CsvRouteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(data: &[u8]) -> Result<Vec<RouteEntry>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(data);

        let mut routes = Vec::new();
        for row in reader.deserialize() {
            let route: RouteEntry = row?;
            routes.push(route);
        }
        Ok(routes)
    }
}

#[async_trait]
impl PageSource for CsvRouteFile {
    fn name(&self) -> &str {
        "routes_file"
    }

    async fn fetch_routes(&self) -> Result<Vec<RouteEntry>> {
        tracing::debug!("Reading routes file: {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let routes = Self::parse(&data)?;
        tracing::debug!("Routes file yielded {} routes", routes.len());
        Ok(routes)
    }
}

/// A JSON list served by the content API (courses, lessons, ...).
pub struct ContentApiSource {
    config: ContentSourceConfig,
    client: Client,
}

impl ContentApiSource {
    pub fn new(config: ContentSourceConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn placeholder_regex() -> Result<Regex> {
        Regex::new(r"\{([^}]+)\}").map_err(|e| SitemapError::TaskError {
            message: format!("placeholder pattern: {}", e),
        })
    }

    /// 從 JSON 回應中取出項目陣列
    fn items(&self, body: serde_json::Value) -> Result<Vec<serde_json::Value>> {
        let list = match &self.config.items_pointer {
            Some(pointer) => body.pointer(pointer).cloned().ok_or_else(|| {
                SitemapError::source_error(
                    &self.config.name,
                    format!("items_pointer '{}' not found in response", pointer),
                )
            })?,
            None => body,
        };

        match list {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(SitemapError::source_error(
                &self.config.name,
                format!("expected a JSON array, got {}", json_kind(&other)),
            )),
        }
    }

    /// 依 path_template 把單一項目轉成路由
    fn item_to_route(&self, placeholder: &Regex, item: &serde_json::Value) -> Result<RouteEntry> {
        let object = item.as_object().ok_or_else(|| {
            SitemapError::source_error(
                &self.config.name,
                format!("expected JSON objects in list, got {}", json_kind(item)),
            )
        })?;

        let mut missing: Option<String> = None;
        let path = placeholder.replace_all(&self.config.path_template, |caps: &Captures| {
            let field = &caps[1];
            match object.get(field).and_then(scalar_to_string) {
                Some(value) => encode_path_value(&value),
                None => {
                    missing.get_or_insert_with(|| field.to_string());
                    String::new()
                }
            }
        });

        if let Some(field) = missing {
            return Err(SitemapError::source_error(
                &self.config.name,
                format!("item is missing field '{}' used in path_template", field),
            ));
        }

        let lastmod = self.config.lastmod_field.as_deref().and_then(|field| {
            let raw = object.get(field)?.as_str()?;
            let parsed = parse_lastmod(raw);
            if parsed.is_none() {
                tracing::warn!(
                    "⚠️ {}: ignoring unparsable {} '{}' for {}",
                    self.config.name,
                    field,
                    raw,
                    path
                );
            }
            parsed
        });

        Ok(RouteEntry {
            path: path.into_owned(),
            lastmod,
            changefreq: self.config.changefreq,
            priority: self.config.priority,
            access: self.config.access,
        })
    }
}

#[async_trait]
impl PageSource for ContentApiSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_routes(&self) -> Result<Vec<RouteEntry>> {
        let timeout = self.config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        tracing::debug!("Making API request to: {}", self.config.endpoint);

        let mut request = self
            .client
            .get(&self.config.endpoint)
            .timeout(Duration::from_secs(timeout));
        if let Some(headers) = &self.config.headers {
            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(SitemapError::source_error(
                &self.config.name,
                format!("{} returned HTTP {}", self.config.endpoint, status),
            ));
        }

        let body: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;
        let items = self.items(body)?;
        let placeholder = Self::placeholder_regex()?;

        let routes = items
            .iter()
            .map(|item| self.item_to_route(&placeholder, item))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("📥 {}: {} pages from content API", self.config.name, routes.len());
        Ok(routes)
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn encode_path_value(value: &str) -> String {
    value.replace('?', "%3F").replace('#', "%23")
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
