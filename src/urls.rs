use url::Url;

/// Accept only Amazon product-page URLs before spending a proxy credit.
/// A product page has an amazon host and a /dp/, /gp/product/ or /product/
/// path segment; search and category pages are rejected.
pub fn is_product_url(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !host.to_lowercase().contains("amazon") {
        return false;
    }
    let path = parsed.path().to_lowercase();
    path.contains("/dp/") || path.contains("/gp/product/") || path.contains("/product/")
}
