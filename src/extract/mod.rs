pub mod numeric;
pub mod price;
pub mod rank;
pub mod reviews;
pub mod title;

use scraper::{Html, Selector};
use serde::Serialize;

/// Field values pulled from one product page. Extraction is total: any
/// input, including empty or non-HTML text, yields a record with sentinel
/// defaults rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub title: Option<String>,
    pub price: Option<String>,
    pub reviews_count: u32,
    pub sales_rank: Option<u32>,
}

/// Parse the document once and run all four extractors against it. The
/// extractors are independent and read-only; none sees the others' results.
pub fn extract_product(html: &str) -> ProductData {
    let doc = Html::parse_document(html);
    ProductData {
        title: title::extract(&doc),
        price: price::extract(&doc),
        reviews_count: reviews::extract(&doc),
        sales_rank: rank::extract(&doc),
    }
}

/// Trimmed text of the first element matching `sel`, if non-empty. Cascades
/// only consider a locator's first match; an empty match means the locator
/// failed and the next one runs.
fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    let el = doc.select(sel).next()?;
    let text = el.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// ── Tests ──
