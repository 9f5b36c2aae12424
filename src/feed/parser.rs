use crate::error::{Error, Result};
use crate::item::FeedItem;
use feed_rs::parser;
use tracing::debug;

/// Parse an RSS or Atom feed into items.
///
/// The item content is the entry body, falling back to the summary (RSS
/// `<description>`). Images already declared by the feed through media
/// elements or an image enclosure become the item's existing image.
pub fn parse_feed(content: &str) -> Result<Vec<FeedItem>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| Error::FeedParse(format!("Failed to parse feed: {e}")))?;

    debug!(
        "Parsed feed: {} ({} entries)",
        feed.title
            .as_ref()
            .map(|t| t.content.as_str())
            .unwrap_or("Untitled"),
        feed.entries.len()
    );

    Ok(feed.entries.into_iter().map(parse_entry).collect())
}

fn parse_entry(entry: feed_rs::model::Entry) -> FeedItem {
    let title = entry.title.map(|t| t.content);

    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate") || l.rel.is_none())
        .map(|l| l.href.clone());

    let content = entry
        .content
        .and_then(|c| c.body)
        .or_else(|| entry.summary.map(|s| s.content))
        .filter(|body| !body.trim().is_empty());

    // Prefer media thumbnails, then image media content, then an image enclosure link
    let image = entry
        .media
        .iter()
        .find_map(|m| m.thumbnails.first().map(|t| t.image.uri.clone()))
        .or_else(|| {
            entry.media.iter().find_map(|m| {
                m.content.iter().find_map(|c| {
                    let is_image = c
                        .content_type
                        .as_ref()
                        .map_or(true, |mime| mime.as_str().starts_with("image/"));
                    if is_image {
                        c.url.as_ref().map(|u| u.to_string())
                    } else {
                        None
                    }
                })
            })
        })
        .or_else(|| {
            entry.links.iter().find_map(|l| {
                let is_image = l
                    .media_type
                    .as_deref()
                    .is_some_and(|media_type| media_type.starts_with("image/"));
                if l.rel.as_deref() == Some("enclosure") && is_image {
                    Some(l.href.clone())
                } else {
                    None
                }
            })
        });

    FeedItem {
        id: entry.id,
        title,
        link,
        content,
        image,
        published: entry.published.or(entry.updated),
    }
}
