use crate::domain::model::PageDescriptor;
use crate::utils::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use url::Url;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A `<sitemap>` entry of a sitemap index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub loc: Url,
    pub lastmod: Option<DateTime<Utc>>,
}

pub fn format_lastmod(lastmod: &DateTime<Utc>) -> String {
    lastmod.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn open_document(root: &str) -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new(root);
    start.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(start))?;
    Ok(writer)
}

fn close_document(mut writer: Writer<Vec<u8>>, root: &str) -> Result<Vec<u8>> {
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serializes pages into a `<urlset>` document.
pub fn render_urlset(pages: &[PageDescriptor]) -> Result<Vec<u8>> {
    let mut writer = open_document("urlset")?;

    for page in pages {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", page.loc.as_str())?;
        if let Some(lastmod) = &page.lastmod {
            write_text_element(&mut writer, "lastmod", &format_lastmod(lastmod))?;
        }
        if let Some(changefreq) = page.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq.as_str())?;
        }
        if let Some(priority) = page.priority {
            write_text_element(&mut writer, "priority", &format!("{:.1}", priority))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    close_document(writer, "urlset")
}

/// Serializes child sitemap locations into a `<sitemapindex>` document.
pub fn render_index(entries: &[IndexEntry]) -> Result<Vec<u8>> {
    let mut writer = open_document("sitemapindex")?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", entry.loc.as_str())?;
        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", &format_lastmod(lastmod))?;
        }
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    close_document(writer, "sitemapindex")
}
