use crate::utils::error::{Result, SitemapError};
use url::Url;

/// Turns route paths into absolute, de-duplicable URLs under the site root.
#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    base: Url,
    trailing_slash: bool,
}

impl UrlCanonicalizer {
    pub fn new(base_url: &str, trailing_slash: bool) -> Result<Self> {
        let mut base = Url::parse(base_url.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SitemapError::InvalidConfigValueError {
                field: "site.base_url".to_string(),
                value: base_url.to_string(),
                reason: format!("Unsupported URL scheme: {}", base.scheme()),
            });
        }
        base.set_query(None);
        base.set_fragment(None);

        // join() 會把最後一段當成檔名，根路徑必須以 '/' 結尾
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            trailing_slash,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn canonicalize(&self, path: &str) -> Result<Url> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(SitemapError::invalid_page(path, "path is empty"));
        }

        let mut url = match Url::parse(trimmed) {
            Ok(absolute) => {
                if absolute.origin() != self.base.origin() {
                    return Err(SitemapError::invalid_page(
                        path,
                        format!("URL is outside of {}", self.base.origin().ascii_serialization()),
                    ));
                }
                absolute
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let joined = self.base.join(trimmed.trim_start_matches('/'))?;
                // "../" 之類的相對路徑不可跳出網站根路徑
                if !joined.path().starts_with(self.base.path()) {
                    return Err(SitemapError::invalid_page(
                        path,
                        format!("path escapes the site root {}", self.base.path()),
                    ));
                }
                joined
            }
            Err(e) => return Err(SitemapError::invalid_page(path, e.to_string())),
        };

        url.set_fragment(None);
        self.apply_trailing_slash(&mut url);
        Ok(url)
    }

    /// The path of `url` relative to the site root, always starting with '/'.
    pub fn site_path(&self, url: &Url) -> String {
        let base_path = self.base.path().trim_end_matches('/');
        let path = url.path();
        let relative = path.strip_prefix(base_path).unwrap_or(path);
        if relative.starts_with('/') {
            relative.to_string()
        } else {
            format!("/{}", relative)
        }
    }

    fn apply_trailing_slash(&self, url: &mut Url) {
        let path = url.path().to_string();
        if path == self.base.path() || path == "/" {
            return;
        }

        if self.trailing_slash && !path.ends_with('/') {
            url.set_path(&format!("{}/", path));
        } else if !self.trailing_slash && path.ends_with('/') {
            url.set_path(path.trim_end_matches('/'));
        }
    }
}
