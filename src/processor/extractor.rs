use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{Html, Selector};

/// Extract the `src` of every `<img>` element, in document order.
///
/// Parsing goes through html5ever's error recovery, so malformed markup yields
/// whatever images could be recovered rather than an error. Images with a
/// missing or empty `src` are skipped. `<noscript>` bodies are parsed as markup.
pub fn extract_image_urls(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let document = parse_html(content);
    let selector = match Selector::parse("img") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect()
}

/// A fresh document per call, parsed as a browser with scripting disabled would
fn parse_html(content: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };

    driver::parse_document(Html::new_document(), opts).one(content)
}
