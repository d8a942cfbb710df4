use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::first_text;

/// Price presentation locators, most specific first. Price stays opaque
/// display text (symbol included); it is never parsed numerically.
static CASCADE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "span.a-price-whole",
        "span.a-price .a-offscreen",
        "#priceblock_ourprice",
        "#priceblock_dealprice",
        "span.a-price.a-text-price.a-size-medium.apexPriceToPay span.a-offscreen",
        ".a-price.aok-align-center span.a-offscreen",
        "span.a-price.aok-align-center.reinventPricePriceToPayMargin.priceToPay span.a-offscreen",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static PRICE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price").unwrap());
static WHOLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price-whole").unwrap());
static SYMBOL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price-symbol").unwrap());
static OFFSCREEN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-offscreen").unwrap());

pub fn extract(doc: &Html) -> Option<String> {
    for sel in CASCADE.iter() {
        if let Some(price) = first_text(doc, sel) {
            return Some(price);
        }
    }

    // Composite fallback: inside a price container, stitch the currency
    // symbol onto the whole-number span, else take the offscreen copy.
    let container = doc.select(&PRICE_CONTAINER).next()?;
    if let Some(whole) = container.select(&WHOLE).next() {
        let whole = trimmed(whole);
        let price = match container.select(&SYMBOL).next() {
            Some(symbol) => format!("{}{}", trimmed(symbol), whole),
            None => whole,
        };
        return Some(price).filter(|p| !p.is_empty());
    }
    container
        .select(&OFFSCREEN)
        .next()
        .map(trimmed)
        .filter(|p| !p.is_empty())
}

fn trimmed(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
