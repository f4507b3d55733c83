use crate::core::canonical::UrlCanonicalizer;
use crate::core::sources::{ContentApiSource, CsvRouteFile, StaticRoutes};
use crate::core::xml::{render_index, render_urlset, IndexEntry};
use crate::core::{ConfigProvider, PageSource, Pipeline, Storage};
use crate::domain::model::{
    BuildResult, GenerationReport, OutputFile, OutputKind, PageDescriptor, RouteEntry,
};
use crate::portal::routes::route_table;
use crate::utils::error::{Result, SitemapError};
use crate::utils::validation::{validate_priority, MAX_URLS_PER_FILE};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const ROBOTS_FILENAME: &str = "robots.txt";

pub struct SitemapPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sources: Vec<Arc<dyn PageSource>>,
    generated_at: DateTime<Utc>,
}

impl<S: Storage, C: ConfigProvider> SitemapPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = Client::new();
        let mut sources: Vec<Arc<dyn PageSource>> = Vec::new();

        // 順序決定重複路徑時誰優先：設定檔 > 路由檔 > 內建路由 > 內容 API
        if !config.routes().is_empty() {
            sources.push(Arc::new(StaticRoutes::new(
                "config_routes",
                config.routes().to_vec(),
            )));
        }
        if let Some(path) = config.routes_file() {
            sources.push(Arc::new(CsvRouteFile::new(path)));
        }
        if config.include_builtin_routes() {
            sources.push(Arc::new(StaticRoutes::new("builtin_routes", route_table())));
        }
        for content in config.content_sources() {
            sources.push(Arc::new(ContentApiSource::new(content.clone(), client.clone())));
        }

        Self {
            storage,
            config,
            sources,
            generated_at: Utc::now(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn with_source(mut self, source: Arc<dyn PageSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    fn compile_excludes(&self) -> Result<Vec<Regex>> {
        self.config
            .exclude_patterns()
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| SitemapError::InvalidConfigValueError {
                    field: "filter.exclude".to_string(),
                    value: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    fn render_robots(&self, canon: &UrlCanonicalizer, disallowed: &[String]) -> Result<Vec<u8>> {
        let mut lines = vec!["User-agent: *".to_string()];
        for path in disallowed {
            lines.push(format!("Disallow: {}", path));
        }
        lines.push("Allow: /".to_string());
        lines.push(String::new());

        let index_url = canon.base().join(self.config.index_filename())?;
        lines.push(format!("Sitemap: {}", index_url));
        lines.push(String::new());

        Ok(lines.join("\n").into_bytes())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SitemapPipeline<S, C> {
    async fn collect(&self) -> Result<Vec<RouteEntry>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_requests().max(1)));
        let mut tasks = JoinSet::new();

        for (index, source) in self.sources.iter().enumerate() {
            let source = Arc::clone(source);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| SitemapError::TaskError {
                        message: e.to_string(),
                    })?;
                let routes = source.fetch_routes().await?;
                tracing::debug!("Source '{}' returned {} routes", source.name(), routes.len());
                Ok::<_, SitemapError>((index, routes))
            });
        }

        let mut per_source: Vec<Vec<RouteEntry>> = vec![Vec::new(); self.sources.len()];
        while let Some(joined) = tasks.join_next().await {
            // 任一來源失敗即中止；drop JoinSet 會取消其餘任務
            let (index, routes) = joined.map_err(|e| SitemapError::TaskError {
                message: e.to_string(),
            })??;
            per_source[index] = routes;
        }

        Ok(per_source.into_iter().flatten().collect())
    }

    async fn build(&self, entries: Vec<RouteEntry>) -> Result<BuildResult> {
        let canon = UrlCanonicalizer::new(self.config.base_url(), self.config.trailing_slash())?;
        let excludes = self.compile_excludes()?;
        let defaults = self.config.defaults();

        let mut seen = HashSet::new();
        let mut pages = Vec::new();
        let mut disallowed: Vec<String> = Vec::new();
        let mut excluded_count = 0;
        let mut duplicate_count = 0;

        for entry in entries {
            let loc = canon.canonicalize(&entry.path)?;

            // 同一 URL 只由第一次出現決定
            if !seen.insert(loc.as_str().to_string()) {
                tracing::debug!("Duplicate URL dropped: {}", loc);
                duplicate_count += 1;
                continue;
            }

            if !entry.access().is_indexable() {
                tracing::debug!("Skipping {:?} route {}", entry.access(), loc);
                excluded_count += 1;
                let path = loc.path().to_string();
                if !disallowed.contains(&path) {
                    disallowed.push(path);
                }
                continue;
            }

            let site_path = canon.site_path(&loc);
            if excludes.iter().any(|re| re.is_match(&site_path)) {
                tracing::debug!("Excluded by filter: {}", site_path);
                excluded_count += 1;
                continue;
            }

            let priority = entry.priority.or(defaults.priority);
            if let Some(priority) = priority {
                validate_priority("priority", priority)
                    .map_err(|e| SitemapError::invalid_page(&entry.path, e.to_string()))?;
            }

            let lastmod = entry
                .lastmod
                .or_else(|| defaults.lastmod_now.then_some(self.generated_at));

            pages.push(PageDescriptor {
                loc,
                lastmod,
                changefreq: entry.changefreq.or(defaults.changefreq),
                priority,
            });
        }

        let max_per_file = self.config.max_urls_per_file().clamp(1, MAX_URLS_PER_FILE);
        let index_file = self.config.index_filename().to_string();
        let mut files = Vec::new();

        if pages.len() <= max_per_file && !self.config.always_index() {
            files.push(OutputFile {
                name: index_file.clone(),
                kind: OutputKind::UrlSet,
                url_count: pages.len(),
                contents: render_urlset(&pages)?,
            });
        } else {
            let mut index_entries = Vec::new();
            let chunks: Vec<&[PageDescriptor]> = if pages.is_empty() {
                vec![&pages[..]]
            } else {
                pages.chunks(max_per_file).collect()
            };

            for (i, chunk) in chunks.into_iter().enumerate() {
                let name = format!("{}-{}.xml", self.config.file_prefix(), i + 1);
                index_entries.push(IndexEntry {
                    loc: canon.base().join(&name)?,
                    lastmod: chunk.iter().filter_map(|p| p.lastmod).max(),
                });
                files.push(OutputFile {
                    name,
                    kind: OutputKind::UrlSet,
                    url_count: chunk.len(),
                    contents: render_urlset(chunk)?,
                });
            }

            files.push(OutputFile {
                name: index_file.clone(),
                kind: OutputKind::Index,
                url_count: 0,
                contents: render_index(&index_entries)?,
            });
        }

        if self.config.robots_txt() {
            files.push(OutputFile {
                name: ROBOTS_FILENAME.to_string(),
                kind: OutputKind::Robots,
                url_count: 0,
                contents: self.render_robots(&canon, &disallowed)?,
            });
        }

        Ok(BuildResult {
            files,
            index_file,
            url_count: pages.len(),
            excluded_count,
            duplicate_count,
        })
    }

    async fn write(&self, result: BuildResult) -> Result<GenerationReport> {
        let mut files_written = Vec::new();
        let mut files_unchanged = Vec::new();

        for file in result.files {
            // 內容相同就不覆寫，保留檔案時間戳
            let existing = self.storage.read_file(&file.name).await.ok();
            if existing.as_deref() == Some(file.contents.as_slice()) {
                tracing::debug!("Unchanged: {}", file.name);
                files_unchanged.push(file.name);
                continue;
            }

            tracing::debug!(
                "Writing {} ({} bytes, {} URLs)",
                file.name,
                file.contents.len(),
                file.url_count
            );
            self.storage.write_file(&file.name, &file.contents).await?;
            files_written.push(file.name);
        }

        Ok(GenerationReport {
            output_path: self.config.output_path().to_string(),
            index_file: result.index_file,
            url_count: result.url_count,
            files_written,
            files_unchanged,
            excluded_count: result.excluded_count,
            duplicate_count: result.duplicate_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Access, ChangeFrequency, ContentSourceConfig, EntryDefaults};
    use chrono::TimeZone;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }

        async fn file_names(&self) -> Vec<String> {
            let files = self.files.lock().await;
            let mut names: Vec<String> = files.keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SitemapError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        base_url: String,
        routes: Vec<RouteEntry>,
        content: Vec<ContentSourceConfig>,
        exclude: Vec<String>,
        defaults: EntryDefaults,
        trailing_slash: bool,
        max_urls_per_file: usize,
        always_index: bool,
        robots_txt: bool,
        builtin: bool,
    }

    impl MockConfig {
        fn new(routes: Vec<RouteEntry>) -> Self {
            Self {
                base_url: "https://learn.example.edu".to_string(),
                routes,
                content: vec![],
                exclude: vec![],
                defaults: EntryDefaults::default(),
                trailing_slash: false,
                max_urls_per_file: MAX_URLS_PER_FILE,
                always_index: false,
                robots_txt: false,
                builtin: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn routes(&self) -> &[RouteEntry] {
            &self.routes
        }

        fn routes_file(&self) -> Option<&str> {
            None
        }

        fn include_builtin_routes(&self) -> bool {
            self.builtin
        }

        fn content_sources(&self) -> &[ContentSourceConfig] {
            &self.content
        }

        fn exclude_patterns(&self) -> &[String] {
            &self.exclude
        }

        fn defaults(&self) -> EntryDefaults {
            self.defaults.clone()
        }

        fn trailing_slash(&self) -> bool {
            self.trailing_slash
        }

        fn max_urls_per_file(&self) -> usize {
            self.max_urls_per_file
        }

        fn concurrent_requests(&self) -> usize {
            2
        }

        fn index_filename(&self) -> &str {
            "sitemap.xml"
        }

        fn file_prefix(&self) -> &str {
            "sitemap"
        }

        fn always_index(&self) -> bool {
            self.always_index
        }

        fn robots_txt(&self) -> bool {
            self.robots_txt
        }
    }

    fn routes(paths: &[&str]) -> Vec<RouteEntry> {
        paths.iter().map(|p| RouteEntry::public(*p)).collect()
    }

    #[tokio::test]
    async fn test_collect_keeps_source_order() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/courses");
            then.status(200)
                .json_body(serde_json::json!([{"id": "cs101"}, {"id": "cs102"}]));
        });

        let mut config = MockConfig::new(routes(&["/", "/about"]));
        config.content = vec![ContentSourceConfig::new(
            "courses",
            server.url("/courses"),
            "/courses/{id}",
        )];
        config.builtin = true;

        let pipeline = SitemapPipeline::new(MockStorage::new(), config);
        assert_eq!(
            pipeline.source_names(),
            vec!["config_routes", "builtin_routes", "courses"]
        );

        let entries = pipeline.collect().await.unwrap();

        api_mock.assert();
        assert_eq!(entries[0].path, "/");
        assert_eq!(entries[1].path, "/about");
        let tail: Vec<&str> = entries[entries.len() - 2..]
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(tail, vec!["/courses/cs101", "/courses/cs102"]);
    }

    #[tokio::test]
    async fn test_collect_fails_when_any_source_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/courses");
            then.status(503);
        });

        let mut config = MockConfig::new(routes(&["/"]));
        config.content = vec![ContentSourceConfig::new(
            "courses",
            server.url("/courses"),
            "/courses/{id}",
        )];

        let pipeline = SitemapPipeline::new(MockStorage::new(), config);
        let err = pipeline.collect().await.unwrap_err();
        assert!(matches!(err, SitemapError::SourceError { .. }));
    }

    #[tokio::test]
    async fn test_build_single_file_with_defaults() {
        let mut config = MockConfig::new(vec![]);
        config.defaults = EntryDefaults {
            changefreq: Some(ChangeFrequency::Weekly),
            priority: Some(0.5),
            lastmod_now: false,
        };
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let entries = vec![
            RouteEntry::public("/").with_priority(1.0),
            RouteEntry::public("/courses"),
        ];
        let result = pipeline.build(entries).await.unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].name, "sitemap.xml");
        assert_eq!(result.files[0].kind, OutputKind::UrlSet);
        assert_eq!(result.url_count, 2);

        let xml = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.5</priority>"));
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
    }

    #[tokio::test]
    async fn test_build_drops_duplicates_and_gated_routes() {
        let mut config = MockConfig::new(vec![]);
        config.robots_txt = true;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let entries = vec![
            RouteEntry::public("/courses"),
            RouteEntry::public("/courses/"),
            RouteEntry::public("https://learn.example.edu/courses#syllabus"),
            RouteEntry::gated("/dashboard/student", Access::Student),
            RouteEntry::gated("/dashboard/teacher", Access::Teacher),
        ];
        let result = pipeline.build(entries).await.unwrap();

        assert_eq!(result.url_count, 1);
        assert_eq!(result.duplicate_count, 2);
        assert_eq!(result.excluded_count, 2);

        let sitemap = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(!sitemap.contains("dashboard"));
        assert_eq!(sitemap.matches("<url>").count(), 1);

        let robots = result
            .files
            .iter()
            .find(|f| f.kind == OutputKind::Robots)
            .unwrap();
        let robots = String::from_utf8(robots.contents.clone()).unwrap();
        assert!(robots.contains("Disallow: /dashboard/student"));
        assert!(robots.contains("Disallow: /dashboard/teacher"));
        assert!(robots.contains("Sitemap: https://learn.example.edu/sitemap.xml"));
    }

    fn robots_of(result: &BuildResult) -> String {
        let robots = result
            .files
            .iter()
            .find(|f| f.kind == OutputKind::Robots)
            .unwrap();
        String::from_utf8(robots.contents.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_config_route_can_gate_builtin_page() {
        let mut config = MockConfig::new(vec![RouteEntry::gated("/about", Access::Teacher)]);
        config.builtin = true;
        config.robots_txt = true;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let entries = pipeline.collect().await.unwrap();
        let result = pipeline.build(entries).await.unwrap();

        let sitemap = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(!sitemap.contains("<loc>https://learn.example.edu/about</loc>"));
        assert!(sitemap.contains("<loc>https://learn.example.edu/courses</loc>"));
        assert!(robots_of(&result).contains("Disallow: /about\n"));
        assert_eq!(result.duplicate_count, 1);
    }

    #[tokio::test]
    async fn test_config_route_can_publish_builtin_gated_page() {
        let mut config = MockConfig::new(routes(&["/dashboard/student"]));
        config.builtin = true;
        config.robots_txt = true;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let entries = pipeline.collect().await.unwrap();
        let result = pipeline.build(entries).await.unwrap();

        let sitemap = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(sitemap.contains("<loc>https://learn.example.edu/dashboard/student</loc>"));
        assert!(!sitemap.contains("/dashboard/teacher"));

        let robots = robots_of(&result);
        assert!(!robots.contains("Disallow: /dashboard/student"));
        assert!(robots.contains("Disallow: /dashboard/teacher"));
        assert_eq!(result.duplicate_count, 1);
        assert_eq!(result.excluded_count, 1);
    }

    #[tokio::test]
    async fn test_build_applies_exclude_patterns() {
        let mut config = MockConfig::new(vec![]);
        config.exclude = vec!["^/admin".to_string(), "/drafts/".to_string()];
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let result = pipeline
            .build(routes(&["/", "/admin/users", "/blog/drafts/new", "/blog"]))
            .await
            .unwrap();

        assert_eq!(result.url_count, 2);
        assert_eq!(result.excluded_count, 2);
    }

    #[tokio::test]
    async fn test_build_splits_into_index() {
        let mut config = MockConfig::new(vec![]);
        config.max_urls_per_file = 2;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let lastmod = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let entries = vec![
            RouteEntry::public("/a").with_lastmod(lastmod),
            RouteEntry::public("/b"),
            RouteEntry::public("/c"),
            RouteEntry::public("/d"),
            RouteEntry::public("/e"),
        ];
        let result = pipeline.build(entries).await.unwrap();

        let names: Vec<&str> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["sitemap-1.xml", "sitemap-2.xml", "sitemap-3.xml", "sitemap.xml"]
        );
        assert_eq!(result.files[2].url_count, 1);

        let index = String::from_utf8(result.files[3].contents.clone()).unwrap();
        assert!(index.contains("<sitemapindex"));
        assert!(index.contains("<loc>https://learn.example.edu/sitemap-3.xml</loc>"));
        assert_eq!(index.matches("<lastmod>").count(), 1);
        assert!(index.contains("<lastmod>2024-05-01T00:00:00Z</lastmod>"));
    }

    #[tokio::test]
    async fn test_always_index_wraps_single_chunk() {
        let mut config = MockConfig::new(vec![]);
        config.always_index = true;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let result = pipeline.build(routes(&["/", "/about", "/courses"])).await.unwrap();

        let names: Vec<&str> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["sitemap-1.xml", "sitemap.xml"]);
        assert_eq!(result.files[0].kind, OutputKind::UrlSet);
        assert_eq!(result.files[0].url_count, 3);
        assert_eq!(result.files[1].kind, OutputKind::Index);
        assert_eq!(result.index_file, "sitemap.xml");

        let index = String::from_utf8(result.files[1].contents.clone()).unwrap();
        assert_eq!(index.matches("<sitemap>").count(), 1);
        assert!(index.contains("<loc>https://learn.example.edu/sitemap-1.xml</loc>"));
    }

    #[tokio::test]
    async fn test_always_index_with_no_pages() {
        let mut config = MockConfig::new(vec![]);
        config.always_index = true;
        let pipeline = SitemapPipeline::new(MockStorage::new(), config);

        let result = pipeline.build(vec![]).await.unwrap();

        assert_eq!(result.url_count, 0);
        let names: Vec<&str> = result.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["sitemap-1.xml", "sitemap.xml"]);

        let chunk = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(chunk.starts_with("<?xml"));
        assert!(chunk.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(!chunk.contains("<url>"));
        assert_eq!(result.files[0].url_count, 0);

        let index = String::from_utf8(result.files[1].contents.clone()).unwrap();
        assert!(index.contains("<sitemapindex"));
        assert!(index.contains("<loc>https://learn.example.edu/sitemap-1.xml</loc>"));
        assert!(!index.contains("<lastmod>"));
    }

    #[tokio::test]
    async fn test_build_rejects_out_of_range_priority() {
        let pipeline = SitemapPipeline::new(MockStorage::new(), MockConfig::new(vec![]));
        let err = pipeline
            .build(vec![RouteEntry::public("/").with_priority(2.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, SitemapError::InvalidPageError { .. }));
    }

    #[tokio::test]
    async fn test_build_rejects_foreign_urls() {
        let pipeline = SitemapPipeline::new(MockStorage::new(), MockConfig::new(vec![]));
        let result = pipeline
            .build(vec![RouteEntry::public("https://elsewhere.example.com/")])
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_lastmod_now_uses_generation_time() {
        let mut config = MockConfig::new(vec![]);
        config.defaults.lastmod_now = true;
        let generated_at = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();
        let pipeline =
            SitemapPipeline::new(MockStorage::new(), config).with_generated_at(generated_at);

        let result = pipeline.build(routes(&["/"])).await.unwrap();
        let xml = String::from_utf8(result.files[0].contents.clone()).unwrap();
        assert!(xml.contains("<lastmod>2025-09-01T08:00:00Z</lastmod>"));
    }

    #[tokio::test]
    async fn test_write_skips_unchanged_files() {
        let storage = MockStorage::new();
        let pipeline = SitemapPipeline::new(storage.clone(), MockConfig::new(vec![]));

        let first = pipeline.build(routes(&["/", "/about"])).await.unwrap();
        let report = pipeline.write(first).await.unwrap();
        assert_eq!(report.files_written, vec!["sitemap.xml"]);
        assert!(report.files_unchanged.is_empty());
        assert_eq!(report.output_path, "test_output");

        let second = pipeline.build(routes(&["/", "/about"])).await.unwrap();
        let report = pipeline.write(second).await.unwrap();
        assert!(report.files_written.is_empty());
        assert_eq!(report.files_unchanged, vec!["sitemap.xml"]);

        let third = pipeline.build(routes(&["/"])).await.unwrap();
        let report = pipeline.write(third).await.unwrap();
        assert_eq!(report.files_written, vec!["sitemap.xml"]);
        assert_eq!(storage.file_names().await, vec!["sitemap.xml"]);
        assert!(!storage
            .get_file("sitemap.xml")
            .await
            .unwrap()
            .contains("/about"));
    }
}
