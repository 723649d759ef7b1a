//! Number formatting for quote cards.

const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Format a large number with a magnitude suffix and two decimals,
/// e.g. `2_500_000_000.0` -> `"2.50B"`. Values below a thousand keep two
/// decimals without suffix.
pub fn compact(value: f64) -> String {
    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_matching_suffix() {
        assert_eq!(compact(3.1e12), "3.10T");
        assert_eq!(compact(2_500_000_000.0), "2.50B");
        assert_eq!(compact(1_000_000.0), "1.00M");
        assert_eq!(compact(45_600.0), "45.60K");
    }

    #[test]
    fn small_values_have_no_suffix() {
        assert_eq!(compact(999.994), "999.99");
        assert_eq!(compact(0.0), "0.00");
    }
}
