//! Length parsing for markup attributes.
//!
//! Markup lengths are a number followed by an optional unit. Everything is
//! converted to points (1/72 inch), the unit of PDF user space.
//!
//! | Unit | Points |
//! |------|--------|
//! | `in` | 72 |
//! | `cm` | 72 / 2.54 |
//! | `mm` | 72 / 25.4 |
//! | `pt` or none | 1 |
//! | `px` | 0.7 |

use crate::error::{Error, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::{all_consuming, map, success},
    number::complete::double,
    sequence::{delimited, pair, preceded},
    IResult,
};

/// Points per inch.
pub const INCH: f32 = 72.0;
/// Points per centimetre.
pub const CM: f32 = INCH / 2.54;
/// Points per millimetre.
pub const MM: f32 = CM / 10.0;
/// Points per pixel.
pub const PX: f32 = 0.7;

/// Converts a length string into points.
pub trait UnitParser: Send + Sync {
    /// Parse `value` into a length in points.
    fn parse_length(&self, value: &str) -> Result<f32>;
}

/// The markup unit grammar: `in`, `cm`, `mm`, `pt`, `px`, or bare points.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUnits;

impl StandardUnits {
    /// Create the standard unit parser.
    pub fn new() -> Self {
        Self
    }
}

impl UnitParser for StandardUnits {
    fn parse_length(&self, value: &str) -> Result<f32> {
        match all_consuming(length)(value) {
            Ok((_, points)) if points.is_finite() => Ok(points as f32),
            _ => Err(Error::InvalidLength(value.to_string())),
        }
    }
}

fn unit_scale(input: &str) -> IResult<&str, f64> {
    alt((
        map(tag("in"), |_| INCH as f64),
        map(tag("cm"), |_| 72.0 / 2.54),
        map(tag("mm"), |_| 72.0 / 25.4),
        map(tag("pt"), |_| 1.0),
        map(tag("px"), |_| PX as f64),
        success(1.0),
    ))(input)
}

fn length(input: &str) -> IResult<&str, f64> {
    map(
        delimited(multispace0, pair(double, preceded(multispace0, unit_scale)), multispace0),
        |(number, scale)| number * scale,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Result<f32> {
        StandardUnits::new().parse_length(value)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_bare_number_is_points() {
        assert_close(parse("12").unwrap(), 12.0);
        assert_close(parse("12.5").unwrap(), 12.5);
        assert_close(parse(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_units() {
        assert_close(parse("1in").unwrap(), 72.0);
        assert_close(parse("2.54cm").unwrap(), 72.0);
        assert_close(parse("25.4mm").unwrap(), 72.0);
        assert_close(parse("10pt").unwrap(), 10.0);
        assert_close(parse("10px").unwrap(), 7.0);
    }

    #[test]
    fn test_whitespace_is_allowed() {
        assert_close(parse(" 50 mm ").unwrap(), 50.0 * MM);
        assert_close(parse("\t3 cm").unwrap(), 3.0 * CM);
    }

    #[test]
    fn test_negative_lengths() {
        assert_close(parse("-1in").unwrap(), -72.0);
    }

    #[test]
    fn test_zero() {
        assert_eq!(parse("0").unwrap(), 0.0);
        assert_eq!(parse("0mm").unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_lengths() {
        for bad in ["", "abc", "10 furlongs", "1in2", "mm", "1..2"] {
            let err = parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidLength(_)), "{:?} should fail", bad);
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(parse("inf").is_err());
        assert!(parse("nan").is_err());
    }
}
