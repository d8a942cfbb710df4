/// Shared digit parsing for the numeric extractors.
///
/// Amazon renders counts and ranks with grouping commas ("1,234 ratings",
/// "#12,345 in Kitchen"), usually surrounded by unrelated text. Both the
/// review-count and sales-rank extractors funnel through these two helpers
/// so the comma handling stays in one place.

/// Strip grouping commas and parse a regex capture like "12,345".
pub fn parse_grouped(raw: &str) -> Option<u32> {
    raw.replace(',', "").parse().ok()
}

/// Strip grouping commas, then return the first run of ASCII digits of at
/// least `min_len`, parsed as u32. Only the first qualifying run is
/// considered; if it overflows, there is no candidate.
pub fn first_digit_run(text: &str, min_len: usize) -> Option<u32> {
    let stripped: String = text.chars().filter(|c| *c != ',').collect();
    let bytes = stripped.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i - start >= min_len {
            return stripped[start..i].parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_commas_stripped() {
        assert_eq!(parse_grouped("1,234"), Some(1234));
        assert_eq!(parse_grouped("12"), Some(12));
        assert_eq!(parse_grouped("x"), None);
    }

    #[test]
    fn first_run_in_noisy_text() {
        assert_eq!(first_digit_run("1,234 ratings", 1), Some(1234));
        assert_eq!(first_digit_run("see all 89 reviews", 1), Some(89));
    }

    #[test]
    fn min_len_skips_short_runs() {
        // "No. 7" is too short for a rank candidate, "45,000" is not.
        assert_eq!(first_digit_run("No. 7 pick, rank 45,000 overall", 3), Some(45000));
        assert_eq!(first_digit_run("7 of 12", 3), None);
    }

    #[test]
    fn comma_stripping_merges_grouped_runs() {
        // "1,234" must scan as one run of four digits, not two short runs.
        assert_eq!(first_digit_run("1,234", 3), Some(1234));
    }

    #[test]
    fn no_digits() {
        assert_eq!(first_digit_run("none here", 1), None);
        assert_eq!(first_digit_run("", 1), None);
    }

    #[test]
    fn overflowing_first_run_is_no_candidate() {
        assert_eq!(first_digit_run("99999999999999 in Books", 3), None);
    }
}
