//! Number rendering for the display and the expression trail

use crate::core::ERROR_TEXT;

/// Formats a display value with en-US thousands grouping
///
/// The fractional part is kept exactly as typed (so `"1234.50"` stays
/// `"1,234.50"` and `"3."` stays `"3."`). The error sentinel passes through.
#[must_use]
pub fn format_number(value: &str) -> String {
    if value == ERROR_TEXT {
        return value.to_string();
    }

    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut formatted = String::with_capacity(value.len() + digits.len() / 3);
    formatted.push_str(sign);
    formatted.push_str(&group_thousands(digits));
    if let Some(frac) = frac_part {
        formatted.push('.');
        formatted.push_str(frac);
    }
    formatted
}

/// Renders a calculation result the way the display stores it
///
/// Shortest round-trip decimal, no trailing `.0`, and negative zero is `"0"`.
#[must_use]
pub fn stringify(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Inserts `,` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_numbers_unchanged() {
        assert_eq!(format_number("0"), "0");
        assert_eq!(format_number("7"), "7");
        assert_eq!(format_number("999"), "999");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_number("1000"), "1,000");
        assert_eq!(format_number("1234567"), "1,234,567");
        assert_eq!(format_number("100000"), "100,000");
    }

    #[test]
    fn test_format_keeps_fraction_verbatim() {
        assert_eq!(format_number("1234.5"), "1,234.5");
        assert_eq!(format_number("1234.50"), "1,234.50");
        assert_eq!(format_number("3."), "3.");
        assert_eq!(format_number("0.0001"), "0.0001");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_number("-1234"), "-1,234");
        assert_eq!(format_number("-0.5"), "-0.5");
    }

    #[test]
    fn test_format_error_passthrough() {
        assert_eq!(format_number("Error"), "Error");
    }

    #[test]
    fn test_stringify_integers_have_no_fraction() {
        assert_eq!(stringify(52.0), "52");
        assert_eq!(stringify(-1.0), "-1");
    }

    #[test]
    fn test_stringify_decimals() {
        assert_eq!(stringify(0.05), "0.05");
        assert_eq!(stringify(2.5), "2.5");
        assert_eq!(stringify(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_stringify_negative_zero() {
        assert_eq!(stringify(-0.0), "0");
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("12"), "12");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
