use crate::core::pipeline::ROBOTS_FILENAME;
use crate::core::ConfigProvider;
use crate::domain::model::{ContentSourceConfig, EntryDefaults, RouteEntry};
use crate::utils::error::{Result, SitemapError};
use crate::utils::validation::{self, Validate, MAX_URLS_PER_FILE};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INDEX_FILENAME: &str = "sitemap.xml";
pub const DEFAULT_FILE_PREFIX: &str = "sitemap";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub defaults: EntryDefaults,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub content: Vec<ContentSourceConfig>,
    pub filter: Option<FilterConfig>,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub performance: Option<PerformanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub trailing_slash: Option<bool>,
    pub include_builtin_routes: Option<bool>,
    pub routes_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub max_urls_per_file: Option<usize>,
    pub index_filename: Option<String>,
    pub file_prefix: Option<String>,
    pub always_index: Option<bool>,
    pub robots_txt: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub concurrent_requests: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置，相對的 routes_file 以設定檔所在目錄為準
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let (Some(routes_file), Some(dir)) =
            (config.site.routes_file.as_ref(), path.as_ref().parent())
        {
            if Path::new(routes_file).is_relative() && !dir.as_os_str().is_empty() {
                config.site.routes_file = Some(dir.join(routes_file).to_string_lossy().into_owned());
            }
        }

        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SitemapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTENT_API_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SitemapError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 索引檔不可與分段檔或 robots.txt 同名
    fn validate_output_names(&self) -> Result<()> {
        let index = self.index_filename();
        let chunk_name = regex::Regex::new(&format!(
            r"^{}-\d+\.xml$",
            regex::escape(self.file_prefix())
        ))
        .map_err(|e| SitemapError::ConfigValidationError {
            field: "output.file_prefix".to_string(),
            message: e.to_string(),
        })?;

        let reason = if index == ROBOTS_FILENAME {
            Some(format!("collides with {}", ROBOTS_FILENAME))
        } else if chunk_name.is_match(index) {
            Some(format!(
                "collides with chunk files named {}-<n>.xml",
                self.file_prefix()
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SitemapError::InvalidConfigValueError {
                field: "output.index_filename".to_string(),
                value: index.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let base_url = self.site.base_url.trim();
        // 空值或未被替換的 ${VAR} 視為缺少設定
        if base_url.is_empty() || (base_url.starts_with("${") && base_url.ends_with('}')) {
            return Err(SitemapError::MissingConfigError {
                field: "site.base_url".to_string(),
            });
        }
        validation::validate_base_url("site.base_url", &self.site.base_url)?;
        if let Some(routes_file) = &self.site.routes_file {
            validation::validate_path("site.routes_file", routes_file)?;
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_range(
            "output.max_urls_per_file",
            self.max_urls_per_file(),
            1,
            MAX_URLS_PER_FILE,
        )?;
        validation::validate_file_name("output.index_filename", self.index_filename())?;
        validation::validate_file_name("output.file_prefix", self.file_prefix())?;
        self.validate_output_names()?;
        validation::validate_positive_number(
            "performance.concurrent_requests",
            self.concurrent_requests(),
            1,
        )?;

        if let Some(priority) = self.defaults.priority {
            validation::validate_priority("defaults.priority", priority)?;
        }

        for (i, route) in self.routes.iter().enumerate() {
            validation::validate_non_empty_string(&format!("routes[{}].path", i), &route.path)?;
            if let Some(priority) = route.priority {
                validation::validate_priority(&format!("routes[{}].priority", i), priority)?;
            }
        }

        if let Some(filter) = &self.filter {
            for pattern in &filter.exclude {
                validation::validate_regex("filter.exclude", pattern)?;
            }
        }

        for (i, source) in self.content.iter().enumerate() {
            let field = |name: &str| format!("content[{}].{}", i, name);
            validation::validate_non_empty_string(&field("name"), &source.name)?;
            validation::validate_url(&field("endpoint"), &source.endpoint)?;
            validation::validate_non_empty_string(&field("path_template"), &source.path_template)?;
            if let Some(priority) = source.priority {
                validation::validate_priority(&field("priority"), priority)?;
            }
            if let Some(timeout) = source.timeout_seconds {
                validation::validate_positive_number(&field("timeout_seconds"), timeout as usize, 1)?;
            }
        }

        Ok(())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.site.base_url
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    fn routes_file(&self) -> Option<&str> {
        self.site.routes_file.as_deref()
    }

    fn include_builtin_routes(&self) -> bool {
        self.site.include_builtin_routes.unwrap_or(true)
    }

    fn content_sources(&self) -> &[ContentSourceConfig] {
        &self.content
    }

    fn exclude_patterns(&self) -> &[String] {
        self.filter
            .as_ref()
            .map(|f| f.exclude.as_slice())
            .unwrap_or(&[])
    }

    fn defaults(&self) -> EntryDefaults {
        self.defaults.clone()
    }

    fn trailing_slash(&self) -> bool {
        self.site.trailing_slash.unwrap_or(false)
    }

    fn max_urls_per_file(&self) -> usize {
        self.output.max_urls_per_file.unwrap_or(MAX_URLS_PER_FILE)
    }

    fn concurrent_requests(&self) -> usize {
        self.performance
            .as_ref()
            .and_then(|p| p.concurrent_requests)
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn index_filename(&self) -> &str {
        self.output
            .index_filename
            .as_deref()
            .unwrap_or(DEFAULT_INDEX_FILENAME)
    }

    fn file_prefix(&self) -> &str {
        self.output.file_prefix.as_deref().unwrap_or(DEFAULT_FILE_PREFIX)
    }

    fn always_index(&self) -> bool {
        self.output.always_index.unwrap_or(false)
    }

    fn robots_txt(&self) -> bool {
        self.output.robots_txt.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
