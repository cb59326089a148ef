use crate::{features::FeatureVector, trainer::TrainedModel};

/// Targets are stored in thousands of dollars; the page shows them scaled by this factor.
pub const PRICE_SCALE: f64 = 10.0;

/// Runs the model on one input and formats the result for display.
pub fn predict(model: &TrainedModel, vector: &FeatureVector) -> String {
    format_price(model.predict(vector))
}

/// Formats a raw model output as `US $ <value>` with exactly two decimals.
pub fn format_price(raw: f64) -> String {
    let text = format!("{:.2}", raw * PRICE_SCALE);
    // `-0.00` is not a price
    let text = match text.as_str() {
        "-0.00" => "0.00".to_string(),
        _ => text,
    };
    format!("US $ {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(s: &str) -> bool {
        let Some(num) = s.strip_prefix("US $ ") else {
            return false;
        };
        let Some((int, frac)) = num.split_once('.') else {
            return false;
        };
        let int = int.strip_prefix('-').unwrap_or(int);
        !int.is_empty()
            && int.chars().all(|c| c.is_ascii_digit())
            && frac.len() == 2
            && frac.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn scales_and_rounds() {
        assert_eq!(format_price(24.0), "US $ 240.00");
        assert_eq!(format_price(21.6), "US $ 216.00");
        assert_eq!(format_price(22.53217), "US $ 225.32");
        assert_eq!(format_price(3.14159), "US $ 31.42");
    }

    #[test]
    fn always_two_decimals() {
        for raw in [0.0, 0.001, 5.0, 12.345678, 50.0, 99.9999, 1e6, -0.0001] {
            let s = format_price(raw);
            assert!(is_well_formed(&s), "{raw} -> {s}");
        }
    }

    #[test]
    fn rounds_the_scaled_value_itself() {
        // 0.045 and 10.045 sit just below the half as binary values
        assert_eq!(format_price(0.0045), "US $ 0.04");
        assert_eq!(format_price(1.0045), "US $ 10.04");
    }

    #[test]
    fn no_negative_zero() {
        assert_eq!(format_price(-0.0001), "US $ 0.00");
        assert_eq!(format_price(-0.0), "US $ 0.00");
    }
}
