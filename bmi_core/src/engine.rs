//! BMI engine: the formula, the category bands and the gauge scale.
//!
//! Everything here is pure. Callers validate inputs first (see `form`).

use crate::{Assessment, BmiCategory, Measurement};

/// Feet to metres.
pub const METRES_PER_FOOT: f64 = 0.3048;

/// Upper end of the result gauge.
pub const GAUGE_MAX: f64 = 50.0;

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 25.0;
const OVERWEIGHT_BELOW: f64 = 30.0;

/// Weight divided by height in metres squared. No bounds checking.
pub fn calculate_bmi(weight_kg: f64, height_ft: f64) -> f64 {
    let metres = height_ft * METRES_PER_FOOT;
    weight_kg / (metres * metres)
}

/// Map a BMI value onto its band. The lower bound of each band is inclusive.
pub fn categorize(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::NormalWeight
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute, round and categorize.
///
/// The category is taken from the rounded value so the label always agrees
/// with the number the user sees.
pub fn assess(measurement: &Measurement) -> Assessment {
    let bmi = round_one_decimal(calculate_bmi(measurement.weight_kg, measurement.height_ft));
    Assessment {
        bmi,
        category: categorize(bmi),
    }
}

/// Position on the 0..=GAUGE_MAX gauge.
pub fn gauge_value(bmi: f64) -> f64 {
    if bmi.is_nan() {
        return 0.0;
    }
    bmi.clamp(0.0, GAUGE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi_reference_value() {
        // 5.9 ft = 1.79832 m
        let bmi = calculate_bmi(70.0, 5.9);
        assert!((bmi - 21.645).abs() < 0.01, "got {}", bmi);
    }

    #[test]
    fn test_calculate_bmi_exact_formula() {
        let metres = 6.0 * 0.3048;
        assert_eq!(calculate_bmi(80.0, 6.0), 80.0 / (metres * metres));
    }

    #[test]
    fn test_categorize_boundaries() {
        assert_eq!(categorize(18.4), BmiCategory::Underweight);
        assert_eq!(categorize(18.5), BmiCategory::NormalWeight);
        assert_eq!(categorize(24.9), BmiCategory::NormalWeight);
        assert_eq!(categorize(25.0), BmiCategory::Overweight);
        assert_eq!(categorize(29.9), BmiCategory::Overweight);
        assert_eq!(categorize(30.0), BmiCategory::Obesity);
        assert_eq!(categorize(0.0), BmiCategory::Underweight);
    }

    #[test]
    fn test_assess_rounds_before_categorizing() {
        let measurement = Measurement {
            weight_kg: 70.0,
            height_ft: 5.9,
            age: 30,
        };
        let assessment = assess(&measurement);
        assert_eq!(assessment.bmi, 21.6);
        assert_eq!(assessment.category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_assess_rounding_moves_into_next_band() {
        // Raw BMI 24.96 displays as 25.0 and must be labelled Overweight
        let metres: f64 = 5.5 * METRES_PER_FOOT;
        let weight = 24.96 * metres * metres;
        let assessment = assess(&Measurement {
            weight_kg: weight,
            height_ft: 5.5,
            age: 40,
        });
        assert_eq!(assessment.bmi, 25.0);
        assert_eq!(assessment.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(21.645), 21.6);
        assert_eq!(round_one_decimal(18.25), 18.3);
        assert_eq!(round_one_decimal(30.0), 30.0);
    }

    #[test]
    fn test_gauge_value_is_clamped() {
        assert_eq!(gauge_value(21.6), 21.6);
        assert_eq!(gauge_value(73.2), GAUGE_MAX);
        assert_eq!(gauge_value(-1.0), 0.0);
        assert_eq!(gauge_value(f64::NAN), 0.0);
    }
}
