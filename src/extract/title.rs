use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::first_text;

/// Structural title locators for the Amazon layouts seen in the wild,
/// most specific first. Earlier entries are more reliable; the cascade
/// short-circuits on the first non-empty match.
static STRUCTURAL: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "#productTitle",
        "span#productTitle",
        "h1#productTitle",
        "h1.a-size-large.product-title-word-break",
        "h1.a-size-large",
        "h1 span.a-size-large",
        r#"h1[data-automation-id="title"]"#,
        ".product-title-word-break",
        "#title_feature_div h1",
        "#titleSection h1",
        "h1.a-text-normal",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static TITLE_ATTR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[data-automation-id="title"]"#).unwrap());

static ANY_H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Headings this short ("Info", "Details") are decoration, not titles.
const MIN_HEADING_LEN: usize = 10;

pub fn extract(doc: &Html) -> Option<String> {
    for sel in STRUCTURAL.iter() {
        if let Some(title) = first_text(doc, sel) {
            return Some(title);
        }
    }

    // Fallbacks: the semantic title attribute, then the first h1 long
    // enough to plausibly be a product name.
    if let Some(title) = first_text(doc, &TITLE_ATTR) {
        return Some(title);
    }
    doc.select(&ANY_H1)
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .find(|text| text.len() > MIN_HEADING_LEN)
}
