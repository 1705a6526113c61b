use thiserror::Error;

/// Value a statistic is declared with: either a plain number or a
/// magnitude string such as `"15K+"`.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    None,
    Thousand,
    Million,
    Billion,
}

impl Scale {
    pub fn factor(self) -> f64 {
        match self {
            Scale::None => 1.0,
            Scale::Thousand => 1e3,
            Scale::Million => 1e6,
            Scale::Billion => 1e9,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'k' => Some(Scale::Thousand),
            'm' => Some(Scale::Million),
            'b' => Some(Scale::Billion),
            _ => None,
        }
    }
}

/// Decimal places a plain value is counted and shown with. Inputs written
/// with more places are rounded to this many.
pub const MAX_DECIMALS: u32 = 4;

/// Largest accepted magnitude in base units. Keeps every animation target
/// well inside `i64` and exactly representable in `f64`.
pub const MAX_MAGNITUDE: f64 = 1e18;

/// A parsed magnitude. `value` is always in base units and always finite;
/// `scale` only records which multiplier letter the input carried.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedMagnitude {
    value: f64,
    scale: Scale,
    decimals: u32,
}

impl ParsedMagnitude {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// The number as written in front of the multiplier letter.
    pub fn mantissa(&self) -> f64 {
        self.value / self.scale.factor()
    }

    /// Decimal places of a plain value below one thousand, as written.
    /// Always 0 for the K, M and B tiers.
    pub fn decimals(&self) -> u32 {
        if self.value.abs() >= 1e3 {
            0
        } else {
            self.decimals
        }
    }

    /// Base-unit size of one step of the animated integer.
    ///
    /// Scaled tiers count in thousandths of the displayed unit so a single
    /// decimal stays exact. Plain values count in their last written decimal
    /// place, so `12.34` steps by `0.01`.
    pub fn counting_unit(&self) -> f64 {
        let magnitude = self.value.abs();
        if magnitude >= 1e9 {
            1e6
        } else if magnitude >= 1e6 {
            1e3
        } else {
            10f64.powi(-(self.decimals() as i32))
        }
    }

    /// Integer the driver animates towards, in counting units.
    pub fn animation_target(&self) -> i64 {
        let steps = match self.decimals() {
            0 => self.value / self.counting_unit(),
            places => self.value * 10f64.powi(places as i32),
        };
        // `parse` caps the magnitude, so this never saturates.
        steps.round() as i64
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("magnitude is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("unsupported scale suffix `{0}` (only K, M and B are understood)")]
    UnsupportedScale(char),
    #[error("magnitude {0} is not finite")]
    NotFinite(f64),
    #[error("magnitude {0} is too large to animate")]
    TooLarge(f64),
}

pub fn parse(raw: &RawValue) -> Result<ParsedMagnitude, ParseError> {
    match raw {
        RawValue::Number(n) if n.is_finite() => checked(*n, Scale::None, decimals_of(&n.to_string())),
        RawValue::Number(n) => Err(ParseError::NotFinite(*n)),
        RawValue::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> Result<ParsedMagnitude, ParseError> {
    let trimmed = text.trim();
    let undecorated = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_end_matches('+')
        .trim_end_matches('%')
        .trim();
    if undecorated.is_empty() {
        return Err(ParseError::Empty);
    }

    let (number, scale) = match undecorated.chars().last() {
        Some(letter) if letter.is_ascii_alphabetic() => {
            // "1e6" style exponents are still numbers, not suffixes.
            if undecorated.parse::<f64>().is_ok() {
                (undecorated, Scale::None)
            } else {
                let scale = Scale::from_letter(letter)
                    .ok_or_else(|| ParseError::UnsupportedScale(letter.to_ascii_uppercase()))?;
                (&undecorated[..undecorated.len() - letter.len_utf8()], scale)
            }
        }
        _ => (undecorated, Scale::None),
    };

    let number = number.trim();
    let mantissa: f64 = number
        .parse()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))?;
    if !mantissa.is_finite() {
        return Err(ParseError::NotFinite(mantissa));
    }

    let value = mantissa * scale.factor();
    let decimals = if number.contains(|c| c == 'e' || c == 'E') {
        decimals_of(&value.to_string())
    } else {
        decimals_of(number)
    };
    checked(value, scale, decimals)
}

fn checked(value: f64, scale: Scale, decimals: u32) -> Result<ParsedMagnitude, ParseError> {
    if value.abs() >= MAX_MAGNITUDE {
        return Err(ParseError::TooLarge(value));
    }
    Ok(ParsedMagnitude { value, scale, decimals })
}

// Digits after the decimal point in a plain (non-exponent) rendering.
fn decimals_of(repr: &str) -> u32 {
    repr.split_once('.')
        .map(|(_, fraction)| fraction.len() as u32)
        .unwrap_or(0)
        .min(MAX_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Result<ParsedMagnitude, ParseError> {
        parse(&RawValue::from(s))
    }

    #[test]
    fn thousands_with_plus() {
        let parsed = text("15K+").unwrap();
        assert_eq!(parsed.value(), 15_000.0);
        assert_eq!(parsed.scale(), Scale::Thousand);
        assert_eq!(parsed.mantissa(), 15.0);
    }

    #[test]
    fn numbers_pass_through() {
        let parsed = parse(&RawValue::from(42i64)).unwrap();
        assert_eq!(parsed.value(), 42.0);
        assert_eq!(parsed.scale(), Scale::None);
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(text("3m").unwrap().value(), 3_000_000.0);
        assert_eq!(text("2.4B").unwrap().value(), 2_400_000_000.0);
        assert_eq!(text("2.4b").unwrap().scale(), Scale::Billion);
    }

    #[test]
    fn decoration_is_stripped() {
        assert_eq!(text("99.9%").unwrap().value(), 99.9);
        assert_eq!(text("$1.2M").unwrap().value(), 1_200_000.0);
        assert_eq!(text(" 500+ ").unwrap().scale(), Scale::None);
    }

    #[test]
    fn trillion_is_rejected() {
        assert_eq!(text("2.4T"), Err(ParseError::UnsupportedScale('T')));
    }

    #[test]
    fn garbage_is_not_zero() {
        assert!(matches!(text("lots"), Err(ParseError::UnsupportedScale('S'))));
        assert!(matches!(text("1.2.3K"), Err(ParseError::InvalidNumber(_))));
        assert_eq!(text("+"), Err(ParseError::Empty));
        assert!(matches!(
            parse(&RawValue::Number(f64::NAN)),
            Err(ParseError::NotFinite(_))
        ));
    }

    #[test]
    fn animation_targets_use_counting_units() {
        assert_eq!(text("15K+").unwrap().animation_target(), 15_000);
        assert_eq!(text("1.25M").unwrap().animation_target(), 1_250);
        assert_eq!(text("2.4B").unwrap().animation_target(), 2_400);
        assert_eq!(text("99.9%").unwrap().animation_target(), 999);
        assert_eq!(text("999").unwrap().animation_target(), 999);
    }

    #[test]
    fn plain_decimals_follow_the_input() {
        let cases = [("12.34", 2, 1_234), ("0.05", 2, 5), ("0.04", 2, 4), ("4.95", 2, 495), ("99.9%", 1, 999)];
        for (input, decimals, target) in cases {
            let parsed = text(input).unwrap();
            assert_eq!(parsed.decimals(), decimals, "{}", input);
            assert_eq!(parsed.animation_target(), target, "{}", input);
        }
        assert_eq!(parse(&RawValue::Number(12.34)).unwrap().animation_target(), 1_234);
        assert_eq!(text("12.340").unwrap().decimals(), 3);
    }

    #[test]
    fn decimals_are_capped() {
        let parsed = text("3.1415926").unwrap();
        assert_eq!(parsed.decimals(), MAX_DECIMALS);
        assert_eq!(parsed.animation_target(), 31_416);
        assert_eq!(text("1234.5").unwrap().decimals(), 0);
    }

    #[test]
    fn huge_values_are_rejected() {
        assert_eq!(parse(&RawValue::Number(1e25)), Err(ParseError::TooLarge(1e25)));
        assert!(matches!(text("2000000000000B"), Err(ParseError::TooLarge(_))));
        let largest = text("999999999B").unwrap();
        assert_eq!(largest.animation_target(), 999_999_999_000);
    }
}
