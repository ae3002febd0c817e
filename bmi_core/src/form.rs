//! Form input validation.
//!
//! Turns the three raw text fields into a [`Measurement`]. All fields are
//! checked for being numeric before any is checked for being positive, so a
//! form with one bad number and one negative number reports the bad number.

use crate::error::ValidationError;
use crate::Measurement;

/// Parse and validate weight (kg), height (ft) and age (years).
pub fn parse_measurement(
    weight: &str,
    height: &str,
    age: &str,
) -> Result<Measurement, ValidationError> {
    let weight_kg = parse_decimal(weight)?;
    let height_ft = parse_decimal(height)?;
    let age = parse_whole(age)?;

    if weight_kg <= 0.0 || height_ft <= 0.0 || age <= 0 {
        return Err(ValidationError::NotPositive);
    }

    Ok(Measurement {
        weight_kg,
        height_ft,
        age: u32::try_from(age).map_err(|_| ValidationError::NotNumeric)?,
    })
}

fn parse_decimal(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotNumeric),
    }
}

fn parse_whole(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotNumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let m = parse_measurement("70", " 5.9 ", "30").unwrap();
        assert_eq!(m.weight_kg, 70.0);
        assert_eq!(m.height_ft, 5.9);
        assert_eq!(m.age, 30);
    }

    #[test]
    fn test_empty_field_is_not_numeric() {
        assert_eq!(
            parse_measurement("", "5.9", "30"),
            Err(ValidationError::NotNumeric)
        );
    }

    #[test]
    fn test_text_is_not_numeric() {
        assert_eq!(
            parse_measurement("seventy", "5.9", "30"),
            Err(ValidationError::NotNumeric)
        );
        assert_eq!(
            parse_measurement("70", "5.9", "thirty"),
            Err(ValidationError::NotNumeric)
        );
    }

    #[test]
    fn test_fractional_age_is_not_numeric() {
        assert_eq!(
            parse_measurement("70", "5.9", "30.5"),
            Err(ValidationError::NotNumeric)
        );
    }

    #[test]
    fn test_non_finite_is_not_numeric() {
        assert_eq!(
            parse_measurement("NaN", "5.9", "30"),
            Err(ValidationError::NotNumeric)
        );
        assert_eq!(
            parse_measurement("70", "inf", "30"),
            Err(ValidationError::NotNumeric)
        );
    }

    #[test]
    fn test_non_positive_rejected() {
        assert_eq!(
            parse_measurement("0", "5.9", "30"),
            Err(ValidationError::NotPositive)
        );
        assert_eq!(
            parse_measurement("70", "-5.9", "30"),
            Err(ValidationError::NotPositive)
        );
        assert_eq!(
            parse_measurement("70", "5.9", "0"),
            Err(ValidationError::NotPositive)
        );
    }

    #[test]
    fn test_numeric_check_precedes_positive_check() {
        assert_eq!(
            parse_measurement("-70", "5.9", "abc"),
            Err(ValidationError::NotNumeric)
        );
    }
}
