//! Kind-directed conversion of raw strings.
//!
//! Dispatch is purely on the field's [`FieldKind`]: text passes through,
//! numbers are parsed within their declared width, and composite or nested
//! kinds yield an [`Unresolved`] marker instead of a conversion.

use std::num::ParseIntError;
use std::str::FromStr;

use num_complex::{Complex, Complex64};
use propath_schema::FieldKind;

use crate::config::BoolFallback;
use crate::error::{CoerceError, ConversionError};
use crate::value::{ParsedValue, Unresolved};

/// Converts raw strings according to a field kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coercer {
    bool_fallback: BoolFallback,
}

impl Coercer {
    /// Create a coercer pairing failed boolean conversions with `bool_fallback`.
    pub const fn new(bool_fallback: BoolFallback) -> Self {
        Self { bool_fallback }
    }

    /// Convert `raw` to the representation `kind` expects.
    ///
    /// Numeric failures carry the kind's zero value as fallback; boolean
    /// failures carry the configured [`BoolFallback`].
    pub fn coerce(&self, kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError> {
        let value = match kind {
            FieldKind::Text | FieldKind::Other => ParsedValue::Text(raw.to_owned()),
            FieldKind::Array | FieldKind::Map | FieldKind::Sequence => {
                ParsedValue::Unresolved(Unresolved::Composite)
            }
            FieldKind::Record(_) | FieldKind::Interface(_) => {
                ParsedValue::Unresolved(Unresolved::Nested)
            }
            FieldKind::Bool => match parse_bool(raw) {
                Some(b) => ParsedValue::Bool(b),
                None => {
                    return Err(CoerceError::new(
                        kind.name(),
                        raw,
                        ParsedValue::Bool(self.bool_fallback.value()),
                        ConversionError::Bool,
                    ));
                }
            },
            FieldKind::Complex32 => complex::<f32>(kind, raw)?,
            FieldKind::Complex64 => complex::<f64>(kind, raw)?,
            FieldKind::F32 => float::<f32>(kind, raw)?,
            FieldKind::F64 => float::<f64>(kind, raw)?,
            FieldKind::Int | FieldKind::I64 => signed::<i64>(kind, raw)?,
            FieldKind::I8 => signed::<i8>(kind, raw)?,
            FieldKind::I16 => signed::<i16>(kind, raw)?,
            FieldKind::I32 => signed::<i32>(kind, raw)?,
            FieldKind::Uint | FieldKind::U64 => unsigned::<u64>(kind, raw)?,
            FieldKind::U8 => unsigned::<u8>(kind, raw)?,
            FieldKind::U16 => unsigned::<u16>(kind, raw)?,
            FieldKind::U32 => unsigned::<u32>(kind, raw)?,
        };

        tracing::trace!(kind = kind.name(), value = %value, "coerced value");
        Ok(value)
    }
}

/// Convert `raw` with the default [`Coercer`].
///
/// ```rust
/// use propath::{ParsedValue, coerce};
/// use propath_schema::FieldKind;
///
/// assert_eq!(coerce(&FieldKind::U16, "8080").unwrap(), ParsedValue::Uint(8080));
/// assert!(coerce(&FieldKind::I8, "999").is_err());
/// ```
pub fn coerce(kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError> {
    Coercer::default().coerce(kind, raw)
}

/// Parse a boolean literal: `1`, `t`, `true`, `0`, `f`, `false`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(true)
    } else if FALSE.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(false)
    } else {
        None
    }
}

fn signed<T>(kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError>
where
    T: FromStr<Err = ParseIntError> + Into<i64>,
{
    raw.parse::<T>()
        .map(|v| ParsedValue::Int(v.into()))
        .map_err(|e| CoerceError::new(kind.name(), raw, ParsedValue::zero_for(kind), e))
}

fn unsigned<T>(kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError>
where
    T: FromStr<Err = ParseIntError> + Into<u64>,
{
    // `FromStr` for unsigned integers tolerates a leading `+`.
    if raw.starts_with('+') {
        return Err(CoerceError::new(
            kind.name(),
            raw,
            ParsedValue::zero_for(kind),
            ConversionError::UnsignedSign,
        ));
    }

    raw.parse::<T>()
        .map(|v| ParsedValue::Uint(v.into()))
        .map_err(|e| CoerceError::new(kind.name(), raw, ParsedValue::zero_for(kind), e))
}

/// Float widths this module parses.
trait Float: FromStr<Err = std::num::ParseFloatError> + Copy {
    fn widen(self) -> f64;
}

impl Float for f32 {
    fn widen(self) -> f64 {
        f64::from(self)
    }
}

impl Float for f64 {
    fn widen(self) -> f64 {
        self
    }
}

fn float<T: Float>(kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError> {
    let value = raw
        .parse::<T>()
        .map_err(|e| CoerceError::new(kind.name(), raw, ParsedValue::zero_for(kind), e))?
        .widen();

    // Finite literals too large for the width parse as infinity.
    if overflowed(value, raw) {
        return Err(CoerceError::new(
            kind.name(),
            raw,
            ParsedValue::zero_for(kind),
            ConversionError::FloatRange,
        ));
    }
    Ok(ParsedValue::Float(value))
}

fn complex<T>(kind: &FieldKind, raw: &str) -> Result<ParsedValue, CoerceError>
where
    T: Float,
    Complex<T>: FromStr<Err = num_complex::ParseComplexError<std::num::ParseFloatError>>,
{
    let literal = raw
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(raw);

    let parsed = literal
        .parse::<Complex<T>>()
        .map_err(|e| CoerceError::new(kind.name(), raw, ParsedValue::zero_for(kind), e))?;
    let value = Complex64::new(parsed.re.widen(), parsed.im.widen());

    let (re_text, im_text) = complex_terms(literal);
    if overflowed(value.re, re_text) || overflowed(value.im, im_text) {
        return Err(CoerceError::new(
            kind.name(),
            raw,
            ParsedValue::zero_for(kind),
            ConversionError::FloatRange,
        ));
    }
    Ok(ParsedValue::Complex(value))
}

/// Source text of the real and imaginary terms of a complex literal.
///
/// Splits at the first `+` or `-` that is neither leading nor part of an
/// exponent; a missing term is empty.
fn complex_terms(literal: &str) -> (&str, &str) {
    let bytes = literal.as_bytes();
    let split = (1..bytes.len()).find(|&i| {
        matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E')
    });
    let (first, second) = match split {
        Some(i) => literal.split_at(i),
        None => (literal, ""),
    };

    if first.trim_end().ends_with(['i', 'j']) {
        (second, first)
    } else {
        (first, second)
    }
}

/// Infinite value whose source text does not spell infinity.
fn overflowed(value: f64, text: &str) -> bool {
    value.is_infinite() && !text.to_ascii_lowercase().contains("inf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use propath_schema::{RecordRef, RecordType};
    use rstest::rstest;

    fn ok(kind: FieldKind, raw: &str) -> ParsedValue {
        coerce(&kind, raw).unwrap()
    }

    fn fallback(kind: FieldKind, raw: &str) -> ParsedValue {
        coerce(&kind, raw).unwrap_err().into_fallback()
    }

    #[rstest]
    #[case("")]
    #[case("hello")]
    #[case("a.b.c")]
    #[case("  spaced  ")]
    fn text_passes_through(#[case] raw: &str) {
        assert_eq!(ok(FieldKind::Text, raw), ParsedValue::Text(raw.to_owned()));
        assert_eq!(ok(FieldKind::Other, raw), ParsedValue::Text(raw.to_owned()));
    }

    #[rstest]
    #[case(FieldKind::Array)]
    #[case(FieldKind::Map)]
    #[case(FieldKind::Sequence)]
    fn composites_are_unresolved(#[case] kind: FieldKind) {
        assert_eq!(ok(kind, "anything"), ParsedValue::Unresolved(Unresolved::Composite));
    }

    #[test]
    fn nested_kinds_are_unresolved() {
        let record = RecordRef::shared(RecordType::builder("Empty").build());
        assert_eq!(
            ok(FieldKind::Record(record.clone()), "{}"),
            ParsedValue::Unresolved(Unresolved::Nested)
        );
        assert_eq!(
            ok(FieldKind::Interface(Some(record)), "x"),
            ParsedValue::Unresolved(Unresolved::Nested)
        );
        assert_eq!(
            ok(FieldKind::Interface(None), ""),
            ParsedValue::Unresolved(Unresolved::Nested)
        );
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("t", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("FaLsE", false)]
    #[case("F", false)]
    #[case("0", false)]
    fn booleans(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(ok(FieldKind::Bool, raw), ParsedValue::Bool(expected));
    }

    #[rstest]
    #[case("notabool")]
    #[case("")]
    #[case("yes")]
    #[case(" true")]
    fn boolean_failures_use_configured_fallback(#[case] raw: &str) {
        assert_eq!(fallback(FieldKind::Bool, raw), ParsedValue::Bool(false));

        let legacy = Coercer::new(BoolFallback::True);
        let err = legacy.coerce(&FieldKind::Bool, raw).unwrap_err();
        assert_eq!(err.fallback(), &ParsedValue::Bool(true));
        assert_eq!(err.conversion(), &ConversionError::Bool);
    }

    #[rstest]
    #[case(FieldKind::I64, "42", 42)]
    #[case(FieldKind::Int, "-9223372036854775808", i64::MIN)]
    #[case(FieldKind::I8, "-128", -128)]
    #[case(FieldKind::I8, "+12", 12)]
    #[case(FieldKind::I16, "32767", 32767)]
    #[case(FieldKind::I32, "-7", -7)]
    fn signed_integers(#[case] kind: FieldKind, #[case] raw: &str, #[case] expected: i64) {
        assert_eq!(ok(kind, raw), ParsedValue::Int(expected));
    }

    #[rstest]
    #[case(FieldKind::I8, "999")]
    #[case(FieldKind::I8, "-129")]
    #[case(FieldKind::I16, "40000")]
    #[case(FieldKind::I32, "1.5")]
    #[case(FieldKind::Int, "9223372036854775808")]
    #[case(FieldKind::I64, "")]
    #[case(FieldKind::I64, "0x10")]
    fn signed_failures_fall_back_to_zero(#[case] kind: FieldKind, #[case] raw: &str) {
        let err = coerce(&kind, raw).unwrap_err();
        assert_eq!(err.fallback(), &ParsedValue::Int(0));
        assert!(matches!(err.conversion(), ConversionError::Int(_)));
        assert_eq!(err.kind(), kind.name());
        assert_eq!(err.value(), raw);
    }

    #[rstest]
    #[case(FieldKind::U8, "255", 255)]
    #[case(FieldKind::U16, "65535", 65535)]
    #[case(FieldKind::U32, "4294967295", 4_294_967_295)]
    #[case(FieldKind::U64, "18446744073709551615", u64::MAX)]
    #[case(FieldKind::Uint, "0", 0)]
    fn unsigned_integers(#[case] kind: FieldKind, #[case] raw: &str, #[case] expected: u64) {
        assert_eq!(ok(kind, raw), ParsedValue::Uint(expected));
    }

    #[rstest]
    #[case(FieldKind::U8, "256")]
    #[case(FieldKind::U16, "-1")]
    #[case(FieldKind::Uint, "18446744073709551616")]
    #[case(FieldKind::U32, "abc")]
    fn unsigned_failures_fall_back_to_zero(#[case] kind: FieldKind, #[case] raw: &str) {
        assert_eq!(fallback(kind, raw), ParsedValue::Uint(0));
    }

    #[rstest]
    #[case(FieldKind::U8, "+5")]
    #[case(FieldKind::Uint, "+0")]
    fn unsigned_values_reject_a_plus_sign(#[case] kind: FieldKind, #[case] raw: &str) {
        let err = coerce(&kind, raw).unwrap_err();
        assert_eq!(err.conversion(), &ConversionError::UnsignedSign);
        assert_eq!(err.fallback(), &ParsedValue::Uint(0));
    }

    #[test]
    fn complex_range_is_checked_per_term() {
        assert_eq!(complex_terms("1e39+infi"), ("1e39", "+infi"));
        assert_eq!(complex_terms("-2.5e-3-4i"), ("-2.5e-3", "-4i"));
        assert_eq!(complex_terms("7i"), ("", "7i"));

        let value = ok(FieldKind::Complex32, "-inf+2i");
        assert_eq!(value, ParsedValue::Complex(Complex64::new(f64::NEG_INFINITY, 2.0)));

        let err = coerce(&FieldKind::Complex32, "1e39+infi").unwrap_err();
        assert_eq!(err.conversion(), &ConversionError::FloatRange);
    }

    #[test]
    fn floats() {
        assert_eq!(ok(FieldKind::F64, "3.25"), ParsedValue::Float(3.25));
        assert_eq!(ok(FieldKind::F64, "-1e3"), ParsedValue::Float(-1000.0));
        assert_eq!(ok(FieldKind::F64, "inf"), ParsedValue::Float(f64::INFINITY));
        // f32 values keep f32 precision after widening.
        assert_eq!(ok(FieldKind::F32, "0.1"), ParsedValue::Float(f64::from(0.1_f32)));
        assert!(ok(FieldKind::F64, "NaN").as_f64().is_some_and(f64::is_nan));
    }

    #[rstest]
    #[case(FieldKind::F64, "abc", false)]
    #[case(FieldKind::F32, "", false)]
    #[case(FieldKind::F32, "1e39", true)]
    #[case(FieldKind::F64, "1e400", true)]
    fn float_failures_fall_back_to_zero(
        #[case] kind: FieldKind,
        #[case] raw: &str,
        #[case] range: bool,
    ) {
        let err = coerce(&kind, raw).unwrap_err();
        assert_eq!(err.fallback(), &ParsedValue::Float(0.0));
        assert_eq!(matches!(err.conversion(), ConversionError::FloatRange), range);
    }

    #[rstest]
    #[case(FieldKind::Complex64, "1+2i", 1.0, 2.0)]
    #[case(FieldKind::Complex64, "(3-4i)", 3.0, -4.0)]
    #[case(FieldKind::Complex64, "2.5", 2.5, 0.0)]
    #[case(FieldKind::Complex64, "-7i", 0.0, -7.0)]
    #[case(FieldKind::Complex32, "0.5+0.25i", 0.5, 0.25)]
    fn complex_numbers(
        #[case] kind: FieldKind,
        #[case] raw: &str,
        #[case] re: f64,
        #[case] im: f64,
    ) {
        assert_eq!(ok(kind, raw), ParsedValue::Complex(Complex64::new(re, im)));
    }

    #[rstest]
    #[case(FieldKind::Complex64, "1+2k")]
    #[case(FieldKind::Complex64, "")]
    #[case(FieldKind::Complex32, "1e39+1i")]
    #[case(FieldKind::Complex32, "1e39+infi")]
    #[case(FieldKind::Complex64, "inf+1e400i")]
    fn complex_failures_fall_back_to_zero(#[case] kind: FieldKind, #[case] raw: &str) {
        assert_eq!(fallback(kind, raw), ParsedValue::Complex(Complex64::new(0.0, 0.0)));
    }

    #[rstest]
    #[case(FieldKind::I16)]
    #[case(FieldKind::U64)]
    #[case(FieldKind::F32)]
    #[case(FieldKind::Complex64)]
    fn numeric_fallbacks_are_zero_values(#[case] kind: FieldKind) {
        assert_eq!(fallback(kind.clone(), "x"), ParsedValue::zero_for(&kind));
    }

    #[test]
    fn parse_bool_rejects_partial_matches() {
        assert_eq!(parse_bool("tru"), None);
        assert_eq!(parse_bool("10"), None);
        assert_eq!(parse_bool("T"), Some(true));
    }
}
