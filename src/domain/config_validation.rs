//! Configuration validation.
//!
//! Checks the `[rates]` and `[report]` sections before an engine or a report
//! adapter is built from them. Absent keys fall back to the statutory
//! defaults; present keys must parse.

use crate::domain::error::ValuationError;
use crate::domain::valuation::{
    CORRECTION_MULTIPLIER, LOWER_EVALUATION_LEVEL, RENT_RIGHT_RATE, RateConstants,
    UPPER_EVALUATION_LEVEL,
};
use crate::ports::config_port::ConfigPort;

pub const RATES_SECTION: &str = "rates";
pub const REPORT_SECTION: &str = "report";

/// Read `[rates]`, defaulting absent keys and checking the result.
pub fn validate_rates_config(config: &dyn ConfigPort) -> Result<RateConstants, ValuationError> {
    let rates = RateConstants {
        rent_right_rate: read_rate(config, "rent_right_rate", RENT_RIGHT_RATE)?,
        lower_evaluation_level: read_rate(
            config,
            "lower_evaluation_level",
            LOWER_EVALUATION_LEVEL,
        )?,
        upper_evaluation_level: read_rate(
            config,
            "upper_evaluation_level",
            UPPER_EVALUATION_LEVEL,
        )?,
        correction_multiplier: read_rate(
            config,
            "correction_multiplier",
            CORRECTION_MULTIPLIER,
        )?,
    };
    validate_rent_right_rate(rates.rent_right_rate)?;
    validate_evaluation_levels(rates.lower_evaluation_level, rates.upper_evaluation_level)?;
    validate_correction_multiplier(rates.correction_multiplier)?;
    Ok(rates)
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), ValuationError> {
    match config.get_string(REPORT_SECTION, "format") {
        None => {}
        Some(s) if matches!(s.trim(), "text" | "json") => {}
        Some(s) => {
            return Err(invalid(
                REPORT_SECTION,
                "format",
                format!("unknown report format '{s}', expected text or json"),
            ));
        }
    }
    if let Err(raw) = config.get_flag(REPORT_SECTION, "details") {
        return Err(invalid(
            REPORT_SECTION,
            "details",
            format!("details must be true or false, got '{raw}'"),
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> ValuationError {
    ValuationError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn read_rate(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, ValuationError> {
    match config.get_number(RATES_SECTION, key) {
        Ok(None) => Ok(default),
        Ok(Some(value)) if value.is_finite() => Ok(value),
        Ok(Some(value)) => Err(invalid(
            RATES_SECTION,
            key,
            format!("{key} must be a finite number, got {value}"),
        )),
        Err(raw) => Err(invalid(
            RATES_SECTION,
            key,
            format!("{key} must be a number, got '{raw}'"),
        )),
    }
}

fn validate_rent_right_rate(value: f64) -> Result<(), ValuationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            RATES_SECTION,
            "rent_right_rate",
            "rent_right_rate must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_evaluation_levels(lower: f64, upper: f64) -> Result<(), ValuationError> {
    if lower <= 0.0 {
        return Err(invalid(
            RATES_SECTION,
            "lower_evaluation_level",
            "lower_evaluation_level must be positive".to_string(),
        ));
    }
    if upper <= lower {
        return Err(invalid(
            RATES_SECTION,
            "upper_evaluation_level",
            "upper_evaluation_level must be greater than lower_evaluation_level".to_string(),
        ));
    }
    Ok(())
}

fn validate_correction_multiplier(value: f64) -> Result<(), ValuationError> {
    if value <= 0.0 {
        return Err(invalid(
            RATES_SECTION,
            "correction_multiplier",
            "correction_multiplier must be positive".to_string(),
        ));
    }
    Ok(())
}
