use crate::models::RangeBounds;

/// Parse a range-encoded string like "10000-20000" or "3-5 days" into
/// inclusive numeric bounds.
///
/// Every character that is not an ASCII digit or a hyphen is stripped
/// before splitting on the first hyphen. The left part becomes `min`; if
/// the right part is absent or unparseable, `max` defaults to `min`
/// (single-value entries such as "5").
///
/// # Returns
/// `None` when `min` cannot be parsed; callers drop such rows.
pub fn parse_range(raw: &str) -> Option<RangeBounds> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let (left, right) = match cleaned.split_once('-') {
        Some((left, right)) => (left, Some(right)),
        None => (cleaned.as_str(), None),
    };

    let min: f64 = left.parse().ok()?;
    let max = right
        .and_then(|r| r.parse::<f64>().ok())
        .unwrap_or(min);

    Some(RangeBounds::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_range() {
        let bounds = parse_range("1000-5000").unwrap();
        assert_eq!(bounds.min, 1000.0);
        assert_eq!(bounds.max, 5000.0);
    }

    #[test]
    fn test_parse_range_with_units() {
        let bounds = parse_range("3-5 days").unwrap();
        assert_eq!(bounds.min, 3.0);
        assert_eq!(bounds.max, 5.0);
    }

    #[test]
    fn test_parse_range_with_currency_noise() {
        let bounds = parse_range("Rs. 10,000 - 20,000").unwrap();
        assert_eq!(bounds.min, 10000.0);
        assert_eq!(bounds.max, 20000.0);
    }

    #[test]
    fn test_parse_single_value() {
        let bounds = parse_range("5").unwrap();
        assert_eq!(bounds.min, 5.0);
        assert_eq!(bounds.max, 5.0);
    }

    #[test]
    fn test_missing_upper_bound_defaults_to_min() {
        let bounds = parse_range("7-").unwrap();
        assert_eq!(bounds.min, 7.0);
        assert_eq!(bounds.max, 7.0);
    }

    #[test]
    fn test_unparseable_min_is_rejected() {
        assert!(parse_range("").is_none());
        assert!(parse_range("n/a").is_none());
        assert!(parse_range("-5").is_none());
    }

    #[test]
    fn test_extra_hyphens_fall_back_to_min() {
        // "7-9" is not a number, so max collapses to min
        let bounds = parse_range("5-7-9").unwrap();
        assert_eq!(bounds.min, 5.0);
        assert_eq!(bounds.max, 5.0);
    }
}
