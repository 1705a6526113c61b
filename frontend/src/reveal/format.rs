use super::parser::ParsedMagnitude;

/// Renders an in-flight counter value.
///
/// `current` is in counting units of `magnitude` (see
/// [`ParsedMagnitude::counting_unit`]). The tier letter is picked from the
/// target, so only the digits move while the animation runs.
pub fn format(current: i64, magnitude: &ParsedMagnitude, prefix: &str, suffix: &str) -> String {
    let target = magnitude.value().abs();
    let unit = magnitude.counting_unit();
    let base = current as f64 * unit;

    let digits = if target >= 1e9 {
        format!("{}B", one_decimal(base / 1e9))
    } else if target >= 1e6 {
        format!("{}M", one_decimal(base / 1e6))
    } else if target >= 1e3 {
        if magnitude.value() % 1000.0 == 0.0 {
            format!("{}K", (base / 1e3).round() as i64)
        } else {
            format!("{}K", one_decimal(base / 1e3))
        }
    } else if magnitude.decimals() > 0 {
        let places = magnitude.decimals();
        format!("{:.*}", places as usize, current as f64 / 10f64.powi(places as i32))
    } else {
        group_thousands(current)
    };

    format!("{}{}{}", prefix, digits, suffix)
}

// Half away from zero, unlike `{:.1}` on its own.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::parser::{parse, RawValue};

    fn magnitude(raw: impl Into<RawValue>) -> ParsedMagnitude {
        parse(&raw.into()).unwrap()
    }

    #[test]
    fn millions_round_to_nearest_tenth() {
        assert_eq!(format(1250, &magnitude(1_250_000i64), "", "+"), "1.3M+");
    }

    #[test]
    fn small_values_render_plainly() {
        assert_eq!(format(999, &magnitude(999i64), "$", ""), "$999");
        assert_eq!(format(42, &magnitude("500+"), "", "+"), "42+");
    }

    #[test]
    fn thousands_drop_decimals_for_round_targets() {
        let round = magnitude("15K+");
        assert_eq!(format(15_000, &round, "", "+"), "15K+");
        assert_eq!(format(7_400, &round, "", "+"), "7K+");

        let fractional = magnitude("2.5K");
        assert_eq!(format(2_500, &fractional, "", ""), "2.5K");
        assert_eq!(format(1_260, &fractional, "", ""), "1.3K");
    }

    #[test]
    fn scale_letter_is_fixed_by_the_target() {
        let billions = magnitude("2.4B");
        assert_eq!(format(0, &billions, "", ""), "0.0B");
        assert_eq!(format(1_200, &billions, "", ""), "1.2B");
        assert_eq!(format(2_400, &billions, "", ""), "2.4B");
    }

    #[test]
    fn fractional_percentages_keep_one_decimal() {
        let uptime = magnitude("99.9%");
        assert_eq!(format(999, &uptime, "", "%"), "99.9%");
        assert_eq!(format(500, &uptime, "", "%"), "50.0%");
    }

    #[test]
    fn prefix_comes_first() {
        assert_eq!(format(1_200, &magnitude("$1.2M"), "$", ""), "$1.2M");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
        assert_eq!(format(12_345, &magnitude(999i64), "", ""), "12,345");
    }

    #[test]
    fn plain_fractions_finish_on_the_written_value() {
        for (input, expected) in [("12.34", "12.34"), ("0.05", "0.05"), ("0.04", "0.04"), ("4.95", "4.95")] {
            let m = magnitude(input);
            assert_eq!(format(m.animation_target(), &m, "", ""), expected);
        }
        let m = magnitude("12.34");
        assert_eq!(format(0, &m, "", ""), "0.00");
        assert_eq!(format(617, &m, "", ""), "6.17");
    }
}
