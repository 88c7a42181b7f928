//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision used for floating-point values. This matches an IEEE 754
/// double, so that floating results agree with what the user would get from a calculator.
pub const PRECISION: u32 = 53;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
///
/// The tokenizer only produces ASCII digits for integer literals, so the fallback is never
/// reached for parsed input.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap_or_default()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a decimal literal such as `3.14`, `3.` or `.5`.
pub fn float_from_str(s: &str) -> Float {
    let mut normalized = String::with_capacity(s.len() + 2);
    if s.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(s);
    if s.ends_with('.') {
        normalized.push('0');
    }

    match Float::parse(&normalized) {
        Ok(parsed) => Float::with_val(PRECISION, parsed),
        Err(_) => float(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(float_from_str("3.").to_f64(), 3.0);
        assert_eq!(float_from_str(".5").to_f64(), 0.5);
        assert_eq!(float_from_str("3.14").to_f64(), 3.14);
    }

    #[test]
    fn big_integers() {
        let n = int_from_str("123456789012345678901234567890");
        assert_eq!(n.to_string(), "123456789012345678901234567890");
        assert_eq!(rational((1, 2)) + rational((1, 3)), rational((5, 6)));
    }
}
