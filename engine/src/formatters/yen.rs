//! Japanese-yen magnitude formatting.
//!
//! Amounts are grouped into 億 (100,000,000) and 万 (10,000) the way yen
//! figures are read aloud. Two output shapes exist for amounts of one 億 or
//! more: a whole 億 with no 万 remainder renders as `"N億円"`, anything else
//! as `"N億M万円"`.

use crate::error::{DisplayError, Result};
use shared::models::{FormattedParts, YenUnit};
use shared::utils::ja_jp_format::{DigitGrouping, JaJpGrouping};

pub const OKU: u64 = 100_000_000;
pub const MAN: u64 = 10_000;

// Decimal digits below the 億 and 0.1億 positions.
const OKU_DIGITS: usize = 8;
const TENTH_OKU_DIGITS: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct YenFormatter<G = JaJpGrouping> {
    grouping: G,
}

impl YenFormatter<JaJpGrouping> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: DigitGrouping> YenFormatter<G> {
    pub fn with_grouping(grouping: G) -> Self {
        Self { grouping }
    }

    /// Splits `amount` into a grouped numeral and its unit suffix.
    pub fn decompose(&self, amount: f64) -> Result<FormattedParts> {
        let digits = rounded_digits(amount)?;

        if digits.len() > OKU_DIGITS {
            let (oku, rest) = digits.split_at(digits.len() - OKU_DIGITS);
            let man = round_div(digits_value(rest), MAN);
            if man == 0 {
                return Ok(FormattedParts::new(self.grouping.group_str(oku), YenUnit::Oku));
            }
            return Ok(FormattedParts::new(
                format!("{}億{}", self.grouping.group_str(oku), self.group(man)),
                YenUnit::Man,
            ));
        }

        let man = round_div(digits_value(&digits), MAN);
        Ok(FormattedParts::new(self.group(man), YenUnit::Man))
    }

    pub fn format(&self, amount: f64) -> Result<String> {
        Ok(self.decompose(amount)?.to_string())
    }

    /// Compact single-unit label for chart axes, e.g. "1.2億" or "123万".
    pub fn format_axis_label(&self, amount: f64) -> Result<String> {
        let digits = rounded_digits(amount)?;

        if digits.len() > OKU_DIGITS {
            // One decimal place of 億, no grouping.
            let (head, rest) = digits.split_at(digits.len() - TENTH_OKU_DIGITS);
            let tenths = if digits_value(rest) >= 5_000_000 {
                increment_digits(head)
            } else {
                head.to_string()
            };
            let (whole, frac) = tenths.split_at(tenths.len() - 1);
            if frac == "0" {
                return Ok(format!("{}億", whole));
            }
            return Ok(format!("{}.{}億", whole, frac));
        }

        let man = round_div(digits_value(&digits), MAN);
        Ok(format!("{}万", self.group(man)))
    }

    fn group(&self, n: u64) -> String {
        self.grouping.group_str(&n.to_string())
    }
}

pub fn decompose(amount: f64) -> Result<FormattedParts> {
    YenFormatter::new().decompose(amount)
}

pub fn format(amount: f64) -> Result<String> {
    YenFormatter::new().format(amount)
}

pub fn format_axis_label(amount: f64) -> Result<String> {
    YenFormatter::new().format_axis_label(amount)
}

fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_nan() {
        return Err(DisplayError::invalid_argument("amount is NaN"));
    }
    if amount.is_infinite() {
        return Err(DisplayError::invalid_argument(format!(
            "amount must be finite, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(DisplayError::invalid_argument(format!(
            "amount must not be negative, got {}",
            amount
        )));
    }
    Ok(amount)
}

// Exact decimal digits of the amount rounded to the nearest yen.
fn rounded_digits(amount: f64) -> Result<String> {
    // abs() folds -0.0 into "0".
    let rounded = validate_amount(amount)?.round().abs();
    Ok(format!("{:.0}", rounded))
}

// Value of a short ASCII digit run (at most eight digits here).
fn digits_value(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}

// Adds one to a decimal digit string, carrying as needed.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    let mut i = out.len();
    while i > 0 {
        i -= 1;
        if out[i] == b'9' {
            out[i] = b'0';
        } else {
            out[i] += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&out))
}

// Integer division rounding half up; inputs are non-negative.
#[inline]
fn round_div(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}
