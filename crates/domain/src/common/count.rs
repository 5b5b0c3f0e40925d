//! Compact display of social counters (likes, views).

/// Format a counter the way social feeds do: `999`, `1.2K`, `3.4M`, `1B`.
///
/// One decimal is kept below 100 of a unit and dropped when it is zero.
pub fn format_compact_count(count: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (size, suffix) in UNITS {
        if count >= size {
            let whole = count / size;
            if whole >= 100 {
                return format!("{whole}{suffix}");
            }
            // Truncate rather than round so 1_999 never shows as "2K"
            let tenths = (count % size) * 10 / size;
            return if tenths == 0 {
                format!("{whole}{suffix}")
            } else {
                format!("{whole}.{tenths}{suffix}")
            };
        }
    }

    count.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_are_verbatim() {
        assert_eq!(format_compact_count(0), "0");
        assert_eq!(format_compact_count(999), "999");
    }

    #[test]
    fn thousands_keep_one_decimal() {
        assert_eq!(format_compact_count(1_000), "1K");
        assert_eq!(format_compact_count(1_250), "1.2K");
        assert_eq!(format_compact_count(1_999), "1.9K");
        assert_eq!(format_compact_count(15_300), "15.3K");
    }

    #[test]
    fn large_units_drop_decimal_past_one_hundred() {
        assert_eq!(format_compact_count(250_400), "250K");
        assert_eq!(format_compact_count(3_400_000), "3.4M");
        assert_eq!(format_compact_count(2_000_000_000), "2B");
    }
}
