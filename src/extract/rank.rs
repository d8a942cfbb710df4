use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::numeric;

/// Plausibility window for ranks recovered from bare digit runs (exclusive
/// bounds). Prices, dates, and other ranks share text blocks with the BSR,
/// so magnitude is the only filter available on the generic fallbacks.
const RANK_FLOOR: u32 = 1000;
const RANK_CEIL: u32 = 10_000_000;

/// Phrase patterns over the whole page text, tried in order.
static PHRASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)Best\s+Sellers?\s+Rank[:\s]*#?\s*([\d,]+)",
        r"(?i)#\s*([\d,]+)\s+in\s+.*?Best\s+Sellers",
        r"(?i)Best\s+Sellers?\s+Rank[:\s]*([\d,]+)",
        r"(?i)#([\d,]+)\s+in\s+[^#]*Best\s+Sellers",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static HASH_RANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*([\d,]+)").unwrap());
static IN_BEST_SELLERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([\d,]+)\s+in\s+.*?Best\s+Sellers").unwrap());
static DETAILS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Best\s+Sellers?\s+Rank[:\s]*#?\s*([\d,]+)").unwrap());

/// Rank-specific element ids, in preference order.
static RANK_IDS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["span#SalesRank", "span#productDetails_salesRank"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Details/specification containers, in preference order.
static DETAIL_CONTAINERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "#productDetails_db_sections",
        "#detailBullets_feature_div",
        "#productDetails_detailBullets_sections1",
        "#productDetails_feature_div",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static TEXT_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, li, div").unwrap());
static TABLE_ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// Returns the Best Sellers Rank, absent when undeterminable. Strategies run
/// in strict order, stopping at the first success; a parsed value of 0 is
/// never a success.
pub fn extract(doc: &Html) -> Option<u32> {
    let page_text = doc.root_element().text().collect::<String>();

    // 1. Phrase patterns over the full page text.
    for re in PHRASE_PATTERNS.iter() {
        if let Some(rank) = capture_positive(re, &page_text) {
            return Some(rank);
        }
    }

    // 2. Known rank-specific elements.
    for sel in RANK_IDS.iter() {
        if let Some(el) = doc.select(sel).next() {
            let text = el.text().collect::<String>();
            if let Some(rank) = capture_positive(&HASH_RANK_RE, &text) {
                return Some(rank);
            }
        }
    }

    // 3. Generic scan over text-bearing elements mentioning the rank.
    if let Some(rank) = scan_text_elements(doc) {
        return Some(rank);
    }

    // 4. Details/specification containers.
    if let Some(container) = DETAIL_CONTAINERS.iter().find_map(|sel| doc.select(sel).next()) {
        let text = container.text().collect::<String>();
        if let Some(rank) = capture_positive(&DETAILS_RE, &text) {
            return Some(rank);
        }
    }

    // 5. Table rows naming the rank.
    for row in doc.select(&TABLE_ROWS) {
        let text = row.text().collect::<String>();
        if !text.contains("Best Sellers Rank") {
            continue;
        }
        if let Some(rank) = numeric::first_digit_run(&text, 3) {
            if plausible(rank) {
                return Some(rank);
            }
        }
    }

    None
}

fn scan_text_elements(doc: &Html) -> Option<u32> {
    for el in doc.select(&TEXT_ELEMENTS) {
        let text = el.text().collect::<String>();
        let lower = text.to_lowercase();
        if !lower.contains("best sellers rank") && !(lower.contains("bsr") && lower.contains("rank"))
        {
            continue;
        }

        // Anchored patterns first; a match here decides this element even
        // when the value parses to 0.
        if let Some(caps) = HASH_RANK_RE
            .captures(&text)
            .or_else(|| IN_BEST_SELLERS_RE.captures(&text))
        {
            if let Some(rank) = numeric::parse_grouped(&caps[1]) {
                if rank > 0 {
                    return Some(rank);
                }
            }
            continue;
        }

        // No anchor: first long digit run, magnitude-filtered.
        if let Some(rank) = numeric::first_digit_run(&text, 3) {
            if plausible(rank) {
                return Some(rank);
            }
        }
    }
    None
}

fn capture_positive(re: &Regex, text: &str) -> Option<u32> {
    let rank = numeric::parse_grouped(&re.captures(text)?[1])?;
    (rank > 0).then_some(rank)
}

fn plausible(rank: u32) -> bool {
    rank > RANK_FLOOR && rank < RANK_CEIL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_from(html: &str) -> Option<u32> {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn inline_phrase() {
        let html = "<p>Best Sellers Rank: #4,321 in Kitchen &amp; Dining</p>";
        assert_eq!(extract_from(html), Some(4321));
    }

    #[test]
    fn hash_in_best_sellers_phrase() {
        let html = "<p>#12,345 in Toys &amp; Games Best Sellers</p>";
        assert_eq!(extract_from(html), Some(12345));
    }

    #[test]
    fn phrase_is_case_insensitive() {
        let html = "<p>BEST SELLERS RANK: 777,001</p>";
        assert_eq!(extract_from(html), Some(777_001));
    }

    #[test]
    fn rank_id_element() {
        // No full-text phrase, so the id locator decides.
        let html = r#"<span id="SalesRank">Ranked #9,876 overall</span>"#;
        assert_eq!(extract_from(html), Some(9876));
    }

    #[test]
    fn generic_scan_hash_pattern() {
        let html = r#"<li>BSR rank for this listing: #55,123</li>"#;
        assert_eq!(extract_from(html), Some(55_123));
    }

    #[test]
    fn generic_scan_bare_run_inside_window() {
        let html = r#"<div>BSR rank estimate 45000 (category: Kitchen)</div>"#;
        assert_eq!(extract_from(html), Some(45_000));
    }

    #[test]
    fn generic_scan_bare_run_below_window() {
        let html = r#"<div>BSR rank estimate 500 (category: Kitchen)</div>"#;
        assert_eq!(extract_from(html), None);
    }

    #[test]
    fn generic_scan_bare_run_above_window() {
        let html = r#"<div>BSR rank estimate 15000000 (category: Kitchen)</div>"#;
        assert_eq!(extract_from(html), None);
    }

    #[test]
    fn details_container() {
        let html = r#"
            <div id="detailBullets_feature_div">
              <span>Product details</span>
              <span>best sellers rank 2,468 overall</span>
            </div>
        "#;
        assert_eq!(extract_from(html), Some(2468));
    }

    #[test]
    fn table_row_with_window() {
        // "No." between the phrase and the digits defeats every anchored
        // pattern, and th/td are outside the generic element scan, so only
        // the table-row strategy can find this one.
        let html = r#"
            <table><tr>
              <th>Best Sellers Rank</th>
              <td>No. 45,000 in category</td>
            </tr></table>
        "#;
        assert_eq!(extract_from(html), Some(45_000));
    }

    #[test]
    fn table_row_outside_window_rejected() {
        let html = r#"
            <table><tr>
              <th>Best Sellers Rank</th>
              <td>No. 999 in category</td>
            </tr></table>
        "#;
        assert_eq!(extract_from(html), None);
    }

    #[test]
    fn zero_rank_rejected() {
        let html = "<p>Best Sellers Rank: #0 in Limbo</p>";
        assert_eq!(extract_from(html), None);
    }

    #[test]
    fn empty_document() {
        assert_eq!(extract_from(""), None);
    }
}
