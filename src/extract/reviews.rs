use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::numeric;

/// Review-summary locators, most specific first.
static CASCADE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "#acrCustomerReviewText",
        "span#acrCustomerReviewText",
        "a#acrCustomerReviewLink span",
        "#acrCustomerReviewLink",
        "#acrCustomerReviewLink span",
        r#"a[data-hook="acr-link"]"#,
        r#"span[data-hook="acr-link"]"#,
        "#averageCustomerReviews span",
        ".averageCustomerReviews span",
        r##"a[href*="#customerReviews"] span"##,
        "#reviewsMedley span",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

/// Full-text fallback patterns, tried in order.
static TEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)([\d,]+)\s*(?:customer\s*)?reviews?",
        r"(?i)([\d,]+)\s*ratings?",
        r"(?i)([\d,]+)\s*global\s*ratings?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Returns the customer review/rating count, 0 when undeterminable.
pub fn extract(doc: &Html) -> u32 {
    for sel in CASCADE.iter() {
        if let Some(el) = doc.select(sel).next() {
            let text = el.text().collect::<String>();
            if let Some(count) = numeric::first_digit_run(&text, 1) {
                if count > 0 {
                    return count;
                }
            }
        }
    }

    // Last resort: pattern-match the whole page text.
    let page_text = doc.root_element().text().collect::<String>();
    for re in TEXT_PATTERNS.iter() {
        if let Some(caps) = re.captures(&page_text) {
            if let Some(count) = numeric::parse_grouped(&caps[1]) {
                if count > 0 {
                    return count;
                }
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_from(html: &str) -> u32 {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn acr_text_with_grouping_commas() {
        let html = r#"<span id="acrCustomerReviewText">1,234 ratings</span>"#;
        assert_eq!(extract_from(html), 1234);
    }

    #[test]
    fn count_only_element() {
        let html = r#"<a id="acrCustomerReviewLink"><span>87</span></a>"#;
        assert_eq!(extract_from(html), 87);
    }

    #[test]
    fn zero_count_falls_through() {
        // A "0 ratings" summary is no signal; the page text fallback picks
        // up the real figure elsewhere.
        let html = r#"
            <span id="acrCustomerReviewText">0 ratings</span>
            <p>Rated by 412 global ratings this year</p>
        "#;
        assert_eq!(extract_from(html), 412);
    }

    #[test]
    fn full_text_fallback_patterns_in_order() {
        let html = "<p>Loved it. 56 customer reviews and 9,000 ratings</p>";
        // "reviews" pattern is tried before "ratings".
        assert_eq!(extract_from(html), 56);
    }

    #[test]
    fn full_text_ratings_pattern() {
        let html = "<p>2,345 Ratings collected</p>";
        assert_eq!(extract_from(html), 2345);
    }

    #[test]
    fn undeterminable_is_zero() {
        assert_eq!(extract_from("<p>no reviews yet</p>"), 0);
        assert_eq!(extract_from(""), 0);
    }
}
