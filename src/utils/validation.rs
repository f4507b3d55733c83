use crate::utils::error::{Result, SitemapError};
use regex::Regex;
use url::Url;

/// Sitemap 協議規定單一檔案最多 50,000 個 URL
pub const MAX_URLS_PER_FILE: usize = 50_000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SitemapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 網站根網址不可帶 query 或 fragment，否則 join 出來的路徑會不正確
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str)?;
    let url = Url::parse(url_str)?;
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "Base URL must not contain a query string or fragment".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a plain file name without directories".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_priority(field_name: &str, priority: f32) -> Result<()> {
    if priority.is_nan() {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: priority.to_string(),
            reason: "Priority must be a number".to_string(),
        });
    }
    validate_range(field_name, priority, 0.0, 1.0)
}

pub fn validate_regex(field_name: &str, pattern: &str) -> Result<()> {
    Regex::new(pattern).map_err(|e| SitemapError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: pattern.to_string(),
        reason: format!("Invalid regular expression: {}", e),
    })?;
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SitemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
