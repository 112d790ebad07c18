//! Lenient numeric parsing for feed fields.

/// Parses a feed field as an integer, falling back to 0.
///
/// Integer text parses directly. Decimal or exponent text parses as a float
/// and truncates toward zero. Anything else, including non-finite values,
/// becomes 0.
#[must_use]
pub fn int_or_zero(field: &str) -> i64 {
    let field = field.trim();
    if let Ok(v) = field.parse::<i64>() {
        return v;
    }
    match field.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_text() {
        assert_eq!(int_or_zero("12345"), 12345);
        assert_eq!(int_or_zero(" 42 "), 42);
        assert_eq!(int_or_zero("-7"), -7);
    }

    #[test]
    fn test_float_text_truncates() {
        assert_eq!(int_or_zero("12345.9"), 12345);
        assert_eq!(int_or_zero("1e3"), 1000);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(int_or_zero(""), 0);
        assert_eq!(int_or_zero("abc"), 0);
        assert_eq!(int_or_zero("NaN"), 0);
        assert_eq!(int_or_zero("inf"), 0);
    }
}
