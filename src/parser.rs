use crate::{entity::Episode, util::to_timestamp};
use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};
use simple_error::SimpleError;
use std::borrow::Cow;
use std::error::Error;

pub const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

const UNKNOWN_SHOW: &str = "Unknown Show";
const UNTITLED: &str = "Untitled";
const DEFAULT_MIME: &str = "audio/mpeg";

/// Decode a feed body to UTF-8, honouring a byte order mark first and the
/// `encoding` of the XML declaration second.
pub fn decode_body(raw: &[u8]) -> Result<Cow<'_, str>, Box<dyn Error>> {
    let encoding = declared_encoding(raw)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        // a utf-16 label on a body we could read as ascii is wrong; a real
        // utf-16 body carries a BOM, which decode() honours regardless
        .map(Encoding::output_encoding)
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(raw);
    if had_errors {
        return Err(Box::new(SimpleError::new(format!(
            "feed payload is not valid {}",
            used.name()
        ))));
    }
    Ok(text)
}

// encoding label from `<?xml ... encoding="..."?>`, if the body starts with one
fn declared_encoding(raw: &[u8]) -> Option<&str> {
    let head = &raw[..raw.len().min(256)];
    let head = head.strip_prefix(b"\xef\xbb\xbf").unwrap_or(head);
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    Some(&rest[..rest.find(quote)?])
}

pub fn parse_document(text: &str) -> Result<Document<'_>, Box<dyn Error>> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(Box::new(SimpleError::new("feed payload is empty")));
    }
    let opt = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, opt)?)
}

/// Pull at most `limit` episodes out of the first `limit` items of the channel.
///
/// Items without an enclosure are dropped but still use up their slot, so a
/// show never contributes anything older than its `limit` newest items.
pub fn extract_episodes(doc: &Document, limit: usize) -> Vec<Episode> {
    let channel = match child(doc.root_element(), None, "channel") {
        Some(c) => c,
        None => {
            log::warn!("document has no <channel>");
            return vec![];
        }
    };
    let show = child_text(channel, None, "title").unwrap_or(UNKNOWN_SHOW);

    channel
        .children()
        .filter(|n| is_element(*n, None, "item"))
        .take(limit)
        .filter_map(|item| to_episode(item, show))
        .collect()
}

fn to_episode(item: Node, show: &str) -> Option<Episode> {
    let enclosure = child(item, None, "enclosure")?;
    let url = match enclosure.attribute("url") {
        Some(u) => u.to_string(),
        None => {
            log::debug!("skip item with url-less enclosure in {}", show);
            return None;
        }
    };
    let text = |name: &str| child_text(item, None, name).unwrap_or_default().to_string();
    let pub_date = text("pubDate");

    Some(Episode {
        show: show.to_string(),
        title: child_text(item, None, "title")
            .unwrap_or(UNTITLED)
            .to_string(),
        description: text("description"),
        mime_type: enclosure.attribute("type").unwrap_or(DEFAULT_MIME).to_string(),
        length: enclosure.attribute("length").unwrap_or("0").to_string(),
        timestamp: to_timestamp(&pub_date),
        pub_date,
        duration: child_text(item, Some(ITUNES_NS), "duration")
            .unwrap_or_default()
            .to_string(),
        guid: child_text(item, None, "guid")
            .map(ToString::to_string)
            .unwrap_or_else(|| url.clone()),
        url,
    })
}

fn is_element(node: Node, ns: Option<&str>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == ns
}

fn child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<&str>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element(*n, ns, name))
}

// Some("") for a present but empty element, None when the element is missing
fn child_text<'a>(node: Node<'a, '_>, ns: Option<&str>, name: &str) -> Option<&'a str> {
    child(node, ns, name).map(|n| n.text().unwrap_or_default())
}
