use std::fmt;

use serde::Serialize;

/// Reseller verdict for one product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Low competition, low saturation: worth listing.
    Sell,
    /// Market saturated regardless of rank.
    Avoid,
    /// Not enough signal either way.
    Risky,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Sell => write!(f, "SELL"),
            Verdict::Avoid => write!(f, "AVOID"),
            Verdict::Risky => write!(f, "RISKY"),
        }
    }
}

/// Classify a listing from its review count and Best Sellers Rank.
///
/// The arms are order-sensitive: the saturation check (reviews > 1000) must
/// run after the rank check, otherwise borderline-rank listings would
/// reclassify. Rank 0 means the extractor found nothing usable and is
/// treated the same as absent.
pub fn classify(reviews_count: u32, sales_rank: Option<u32>) -> Verdict {
    match sales_rank {
        None | Some(0) => Verdict::Risky,
        Some(rank) if rank < 20_000 && reviews_count < 200 => Verdict::Sell,
        _ if reviews_count > 1000 => Verdict::Avoid,
        _ => Verdict::Risky,
    }
}
