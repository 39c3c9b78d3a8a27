use crate::{config::FeedMeta, entity::Episode, parser::ITUNES_NS};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;
use std::path::Path;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

type XmlWriter = Writer<Vec<u8>>;

/// Render the curated feed as an indented RSS 2.0 document.
pub fn build_feed(
    meta: &FeedMeta,
    eps: &[Episode],
    now: DateTime<Utc>,
) -> Result<String, Box<dyn Error>> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:itunes", ITUNES_NS));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    w.write_event(Event::Start(rss))?;
    w.write_event(Event::Start(BytesStart::new("channel")))?;

    write_channel_meta(&mut w, meta, now)?;
    for ep in eps {
        write_item(&mut w, ep)?;
    }

    w.write_event(Event::End(BytesEnd::new("channel")))?;
    w.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut out = String::from_utf8(w.into_inner())?;
    out.push('\n');
    Ok(out)
}

/// Build the feed and overwrite `path` with it.
pub fn write_feed(meta: &FeedMeta, eps: &[Episode], path: &Path) -> Result<(), Box<dyn Error>> {
    let xml = build_feed(meta, eps, Utc::now())?;
    std::fs::write(path, xml)?;
    log::info!("Generated {} with {} episodes", path.display(), eps.len());
    Ok(())
}

fn write_channel_meta(
    w: &mut XmlWriter,
    meta: &FeedMeta,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn Error>> {
    write_text(w, "title", &meta.title)?;
    write_text(w, "description", &meta.description)?;
    write_text(w, "link", &meta.link)?;
    write_text(w, "language", &meta.language)?;
    write_text(
        w,
        "lastBuildDate",
        &now.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
    )?;

    write_text(w, "itunes:author", &meta.author)?;
    write_text(w, "itunes:summary", &meta.description)?;
    write_text(w, "itunes:explicit", if meta.explicit { "yes" } else { "no" })?;
    write_empty(w, "itunes:image", &[("href", meta.image.as_str())])?;
    write_empty(w, "itunes:category", &[("text", meta.category.as_str())])?;
    write_empty(
        w,
        "atom:link",
        &[
            ("href", meta.feed_url.as_str()),
            ("rel", "self"),
            ("type", "application/rss+xml"),
        ],
    )
}

fn write_item(w: &mut XmlWriter, ep: &Episode) -> Result<(), Box<dyn Error>> {
    w.write_event(Event::Start(BytesStart::new("item")))?;
    write_text(w, "title", &ep.full_title())?;
    write_text(w, "description", &ep.description)?;
    write_empty(
        w,
        "enclosure",
        &[
            ("url", ep.url.as_str()),
            ("type", ep.mime_type.as_str()),
            ("length", ep.length.as_str()),
        ],
    )?;
    write_text(w, "guid", &ep.guid)?;
    if !ep.pub_date.is_empty() {
        write_text(w, "pubDate", &ep.pub_date)?;
    }
    if !ep.duration.is_empty() {
        write_text(w, "itunes:duration", &ep.duration)?;
    }
    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text(w: &mut XmlWriter, name: &str, text: &str) -> Result<(), Box<dyn Error>> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), Box<dyn Error>> {
    let mut el = BytesStart::new(name);
    for attr in attrs {
        el.push_attribute(*attr);
    }
    w.write_event(Event::Empty(el))?;
    Ok(())
}
