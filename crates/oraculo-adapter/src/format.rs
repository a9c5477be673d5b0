//! Display formatting: abbreviated dollar volumes, signed percents and
//! Argentine-Spanish dates.

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

const MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Abbreviate a dollar volume: `$1.25M` at a million and up, `$3.40K` at a
/// thousand and up, `$50.00` below that. Always two decimals.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000.0 {
        format!("${:.2}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("${:.2}K", volume / 1_000.0)
    } else {
        format!("${volume:.2}")
    }
}

/// Percent change of a chart series, one decimal with an explicit sign:
/// `+75.0%`, `-3.2%`. Zero counts as positive.
pub fn format_change_pct(pct: f64) -> String {
    format!("{pct:+.1}%")
}

/// Percent change of a quote, two decimals with an explicit sign: `+2.41%`,
/// `-1.20%`.
pub fn format_quote_pct(pct: f64) -> String {
    format!("{pct:+.2}%")
}

/// A probability in [0, 100] as a whole percent: `62%`.
pub fn format_probability(probability: f64) -> String {
    format!("{probability:.0}%")
}

/// A quote price with two decimals: `$58.30`.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Short Argentine date (`25 oct 2026`) from an ISO 8601 string.
/// Unparseable input is passed through unchanged so a bad upstream date
/// still renders something.
pub fn format_date_short(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => {
            use chrono::Datelike;
            format!("{} {} {}", dt.day(), MONTHS_SHORT[dt.month0() as usize], dt.year())
        }
        Err(_) => iso.to_string(),
    }
}

/// Long Argentine date (`25 de octubre de 2026`) from an ISO 8601 string,
/// with the same pass-through fallback as [`format_date_short`].
pub fn format_date_long(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => {
            use chrono::Datelike;
            format!("{} de {} de {}", dt.day(), MONTHS_LONG[dt.month0() as usize], dt.year())
        }
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_formats_across_magnitudes() {
        assert_eq!(format_volume(1_250_000.0), "$1.25M");
        assert_eq!(format_volume(3_400.0), "$3.40K");
        assert_eq!(format_volume(50.0), "$50.00");
    }

    #[test]
    fn volume_thresholds_are_inclusive() {
        assert_eq!(format_volume(1_000_000.0), "$1.00M");
        assert_eq!(format_volume(1_000.0), "$1.00K");
        assert_eq!(format_volume(999.99), "$999.99");
        assert_eq!(format_volume(0.0), "$0.00");
    }

    #[test]
    fn change_pct_uses_one_decimal_with_sign() {
        assert_eq!(format_change_pct(75.0), "+75.0%");
        assert_eq!(format_change_pct(0.0), "+0.0%");
        assert_eq!(format_change_pct(-3.2), "-3.2%");
    }

    #[test]
    fn quote_pct_uses_two_decimals_with_sign() {
        assert_eq!(format_quote_pct(2.41), "+2.41%");
        assert_eq!(format_quote_pct(0.0), "+0.00%");
        assert_eq!(format_quote_pct(-1.2), "-1.20%");
    }

    #[test]
    fn probability_rounds_to_whole_percent() {
        assert_eq!(format_probability(62.4), "62%");
        assert_eq!(format_probability(99.7), "100%");
    }

    #[test]
    fn price_uses_two_decimals() {
        assert_eq!(format_price(58.3), "$58.30");
    }

    #[test]
    fn dates_render_in_spanish() {
        assert_eq!(format_date_short("2026-10-25T12:00:00Z"), "25 oct 2026");
        assert_eq!(format_date_long("2026-10-25T12:00:00Z"), "25 de octubre de 2026");
        assert_eq!(format_date_short("2026-01-03T00:00:00-03:00"), "3 ene 2026");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date_short("pronto"), "pronto");
        assert_eq!(format_date_long(""), "");
    }
}
