//! Sectional ownership valuation of a condominium unit.
//!
//! The pipeline derives the building age, land-use right area and price, the
//! deviation rate built from components A to D, the evaluation level, and the
//! sectional correction rate, then applies the rate to the building and land
//! values for both the self-use and the rented case.
//!
//! Rounding is step specific and must not be reordered. The engine never
//! rejects input: degenerate values produce NaN or infinities in the result.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::input::ValuationInput;
use super::rounding::{round_away_from_zero, round_half_up, truncate_down};

/// Statutory borrowed-house-right ratio.
pub const RENT_RIGHT_RATE: f64 = 0.3;
/// Evaluation levels below this trigger the correction.
pub const LOWER_EVALUATION_LEVEL: f64 = 0.6;
/// Evaluation levels above this trigger the correction.
pub const UPPER_EVALUATION_LEVEL: f64 = 1.0;
/// Factor applied to the deviation rate when the correction fires.
pub const CORRECTION_MULTIPLIER: f64 = 0.6;

const AGE_COEFFICIENT: f64 = -0.033;
const FLOOR_INDEX_CAP: i64 = 33;
const FLOOR_INDEX_COEFFICIENT: f64 = 0.239;
const FLOOR_LEVEL_COEFFICIENT: f64 = 0.018;
const NARROWNESS_COEFFICIENT: f64 = -1.195;
const DEVIATION_CONSTANT: f64 = 3.22;

/// Rates the engine is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConstants {
    pub rent_right_rate: f64,
    pub lower_evaluation_level: f64,
    pub upper_evaluation_level: f64,
    pub correction_multiplier: f64,
}

impl Default for RateConstants {
    fn default() -> Self {
        Self {
            rent_right_rate: RENT_RIGHT_RATE,
            lower_evaluation_level: LOWER_EVALUATION_LEVEL,
            upper_evaluation_level: UPPER_EVALUATION_LEVEL,
            correction_multiplier: CORRECTION_MULTIPLIER,
        }
    }
}

/// Where the evaluation level fell relative to the correction band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrectionBand {
    BelowBand,
    WithinBand,
    AboveBand,
}

/// Intermediate values kept for step-by-step audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub building_age_raw: f64,
    pub land_right_area_raw: f64,
    pub land_right_price_raw: f64,
    /// Building age component.
    #[serde(rename = "A")]
    pub a: f64,
    /// Total floors component.
    #[serde(rename = "B")]
    pub b: f64,
    /// Floor level component.
    #[serde(rename = "C")]
    pub c: f64,
    /// Land share narrowness component.
    #[serde(rename = "D")]
    pub d: f64,
    pub total_floors_index: f64,
    pub share_narrowness_degree: f64,
    pub deviation_rate_raw: f64,
    pub correction_band: CorrectionBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub building_age: f64,
    pub land_right_area: f64,
    pub land_right_price: f64,
    pub deviation_rate: f64,
    pub evaluation_level: f64,
    pub sectional_correction_rate: f64,
    pub sectional_building_price: f64,
    pub rental_building_price: f64,
    pub land_right_value: f64,
    pub leased_land_value: f64,
    pub total_self: f64,
    pub total_rental: f64,
    pub details: CalculationDetails,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValuationEngine {
    rates: RateConstants,
}

impl ValuationEngine {
    pub fn new(rates: RateConstants) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateConstants {
        &self.rates
    }

    /// Run the full valuation for one unit.
    pub fn evaluate(&self, input: &ValuationInput) -> ValuationResult {
        let rates = &self.rates;

        let building_age_raw = building_age_raw(&input.inheritance_date, &input.construction_date);
        let building_age = round_away_from_zero(building_age_raw, 0);

        let land_right_area_raw =
            input.land_area * (input.land_share_numerator / input.land_share_denominator);
        let land_right_area = round_away_from_zero(land_right_area_raw, 2);

        let land_right_price_raw = input.road_price * land_right_area * input.road_price_rate;
        let land_right_price = round_half_up(land_right_price_raw, 0);

        let a = building_age * AGE_COEFFICIENT;
        let total_floors_index = total_floors_index(input.total_floors);
        let b = truncate_down(total_floors_index * FLOOR_INDEX_COEFFICIENT, 3);
        let c = floor_component(input.floor);
        // Uses the unrounded area, not the value rounded to 2 digits above.
        let share_narrowness_degree =
            round_away_from_zero(land_right_area_raw / input.exclusive_area, 3);
        let d = round_away_from_zero(share_narrowness_degree * NARROWNESS_COEFFICIENT, 3);

        let deviation_rate_raw = a + b + c + d + DEVIATION_CONSTANT;
        let deviation_rate = round_half_up(deviation_rate_raw, 3);
        let evaluation_level = 1.0 / deviation_rate;

        let (correction_band, sectional_correction_rate) =
            correction_rate(rates, deviation_rate, evaluation_level);

        let sectional_building_price = input.building_price * sectional_correction_rate;
        let rental_building_price = sectional_building_price * (1.0 - rates.rent_right_rate);
        let land_right_value = land_right_price * sectional_correction_rate;
        let leased_land_value = land_right_value
            - (land_right_value
                * input.leasehold_rate
                * rates.rent_right_rate
                * (input.rental_rate / 100.0));

        let total_self = sectional_building_price + land_right_value;
        let total_rental = rental_building_price + leased_land_value;

        debug!(
            building_age,
            deviation_rate,
            evaluation_level,
            band = ?correction_band,
            total_self,
            total_rental,
            "unit evaluated"
        );
        if !total_self.is_finite() || !total_rental.is_finite() {
            warn!(total_self, total_rental, "valuation produced non-finite totals");
        }

        ValuationResult {
            building_age,
            land_right_area,
            land_right_price,
            deviation_rate,
            evaluation_level,
            sectional_correction_rate,
            sectional_building_price,
            rental_building_price,
            land_right_value,
            leased_land_value,
            total_self,
            total_rental,
            details: CalculationDetails {
                building_age_raw,
                land_right_area_raw,
                land_right_price_raw,
                a,
                b,
                c,
                d,
                total_floors_index,
                share_narrowness_degree,
                deviation_rate_raw,
                correction_band,
            },
        }
    }
}

/// Evaluate with the statutory default rates.
pub fn evaluate(input: &ValuationInput) -> ValuationResult {
    ValuationEngine::default().evaluate(input)
}

/// Difference in calendar years plus one. NaN when either date is unreadable.
pub fn building_age_raw(inheritance_date: &str, construction_date: &str) -> f64 {
    match (calendar_year(inheritance_date), calendar_year(construction_date)) {
        (Some(end), Some(start)) => f64::from(end - start + 1),
        _ => f64::NAN,
    }
}

fn calendar_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let year = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .map(|d| d.year())
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.year()))
        .ok();
    if year.is_none() {
        warn!(date = value, "unreadable date, building age is undefined");
    }
    year
}

/// 1.0 above 33 floors, otherwise floors / 33 truncated to 3 digits.
pub fn total_floors_index(total_floors: i64) -> f64 {
    if total_floors > FLOOR_INDEX_CAP {
        1.0
    } else {
        truncate_down(total_floors as f64 / FLOOR_INDEX_CAP as f64, 3)
    }
}

/// Basement and ground-level units contribute nothing.
pub fn floor_component(floor: i64) -> f64 {
    if floor > 0 {
        floor as f64 * FLOOR_LEVEL_COEFFICIENT
    } else {
        0.0
    }
}

fn correction_rate(
    rates: &RateConstants,
    deviation_rate: f64,
    evaluation_level: f64,
) -> (CorrectionBand, f64) {
    // Both out-of-band branches currently apply the same formula. Kept as
    // separate arms until the statutory treatment above the band is confirmed.
    if evaluation_level < rates.lower_evaluation_level {
        (
            CorrectionBand::BelowBand,
            deviation_rate * rates.correction_multiplier,
        )
    } else if evaluation_level > rates.upper_evaluation_level {
        (
            CorrectionBand::AboveBand,
            deviation_rate * rates.correction_multiplier,
        )
    } else {
        (CorrectionBand::WithinBand, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_input() -> ValuationInput {
        ValuationInput {
            inheritance_date: "2025-12-01".into(),
            construction_date: "2012-02-16".into(),
            total_floors: 10,
            floor: 7,
            exclusive_area: 63.26,
            land_area: 1306.0,
            land_share_numerator: 6608.0,
            land_share_denominator: 369_648.0,
            building_price: 6_148_686.0,
            road_price: 68_000.0,
            road_price_rate: 1.0,
            leasehold_rate: 0.5,
            rental_rate: 100.0,
        }
    }

    // Old low-rise unit with a large land share; deviation rate is driven by A and D.
    fn low_rise_input(construction_date: &str) -> ValuationInput {
        ValuationInput {
            inheritance_date: "2025-04-01".into(),
            construction_date: construction_date.into(),
            total_floors: 2,
            floor: 1,
            exclusive_area: 100.0,
            land_area: 1000.0,
            land_share_numerator: 1.0,
            land_share_denominator: 10.0,
            building_price: 10_000_000.0,
            road_price: 100_000.0,
            road_price_rate: 1.0,
            leasehold_rate: 0.6,
            rental_rate: 100.0,
        }
    }

    #[test]
    fn reference_unit_intermediates() {
        let r = evaluate(&reference_input());

        assert_eq!(r.details.building_age_raw, 14.0);
        assert_eq!(r.building_age, 14.0);
        assert_relative_eq!(r.details.land_right_area_raw, 23.346_664_935, epsilon = 1e-8);
        assert_eq!(r.land_right_area, 23.35);
        assert_eq!(r.land_right_price, 1_587_800.0);
        assert_relative_eq!(r.details.a, -0.462, epsilon = 1e-12);
        assert_eq!(r.details.total_floors_index, 0.303);
        assert_eq!(r.details.b, 0.072);
        assert_relative_eq!(r.details.c, 0.126, epsilon = 1e-12);
        assert_eq!(r.details.share_narrowness_degree, 0.37);
        assert_eq!(r.details.d, -0.443);
        assert!(r.details.d < 0.0);
        assert_eq!(r.deviation_rate, 2.513);
    }

    #[test]
    fn reference_unit_totals() {
        let r = evaluate(&reference_input());

        assert_relative_eq!(r.evaluation_level, 1.0 / 2.513);
        assert_eq!(r.details.correction_band, CorrectionBand::BelowBand);
        assert_relative_eq!(r.sectional_correction_rate, 1.5078, epsilon = 1e-12);
        assert_relative_eq!(r.sectional_building_price, 9_270_988.7508, epsilon = 1e-4);
        assert_relative_eq!(r.rental_building_price, 6_489_692.125_56, epsilon = 1e-4);
        assert_relative_eq!(r.land_right_value, 2_394_084.84, epsilon = 1e-4);
        assert_relative_eq!(r.leased_land_value, 2_034_972.114, epsilon = 1e-4);
        assert_relative_eq!(r.total_self, 11_665_073.5908, epsilon = 1e-4);
        assert_relative_eq!(r.total_rental, 8_524_664.239_56, epsilon = 1e-4);
    }

    #[test]
    fn building_age_counts_calendar_years_only() {
        assert_eq!(building_age_raw("2025-01-01", "2010-01-01"), 16.0);
        assert_eq!(building_age_raw("2025-01-01", "2024-12-31"), 2.0);
        assert_eq!(building_age_raw("2025/12/01", "2012-02-16"), 14.0);
        assert_eq!(building_age_raw("2025-12-01T09:00:00+09:00", "2012-02-16"), 14.0);
    }

    #[test]
    fn unreadable_date_yields_nan_without_panicking() {
        let input = ValuationInput {
            inheritance_date: "invalid-date".into(),
            ..reference_input()
        };
        let r = evaluate(&input);
        assert!(r.building_age.is_nan());
        assert!(r.details.a.is_nan());
        assert!(r.deviation_rate.is_nan());
        assert!(r.total_self.is_nan());
    }

    #[test]
    fn total_floors_index_truncates_and_caps() {
        assert_eq!(total_floors_index(1), 0.03);
        assert_eq!(total_floors_index(10), 0.303);
        assert_eq!(total_floors_index(33), 1.0);
        assert_eq!(total_floors_index(34), 1.0);
        assert_eq!(total_floors_index(60), 1.0);
    }

    #[test]
    fn tower_gets_full_floor_component() {
        let input = ValuationInput {
            total_floors: 40,
            floor: 35,
            ..reference_input()
        };
        let r = evaluate(&input);
        assert_eq!(r.details.total_floors_index, 1.0);
        assert_eq!(r.details.b, 0.239);
        assert_relative_eq!(r.details.c, 0.63, epsilon = 1e-12);
    }

    #[test]
    fn basement_floor_contributes_nothing() {
        assert_eq!(floor_component(0), 0.0);
        let input = ValuationInput {
            floor: 0,
            ..reference_input()
        };
        assert_eq!(evaluate(&input).details.c, 0.0);
    }

    #[test]
    fn within_band_keeps_rate_at_one() {
        let r = evaluate(&low_rise_input("1996-04-01"));
        assert_eq!(r.building_age, 30.0);
        assert_eq!(r.deviation_rate, 1.067);
        assert_eq!(r.details.correction_band, CorrectionBand::WithinBand);
        assert_eq!(r.sectional_correction_rate, 1.0);
        assert_eq!(r.sectional_building_price, 10_000_000.0);
        assert_eq!(r.land_right_value, 10_000_000.0);
        assert_relative_eq!(r.rental_building_price, 7_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(r.leased_land_value, 8_200_000.0, epsilon = 1e-6);
    }

    #[test]
    fn above_band_applies_same_formula_as_below() {
        let r = evaluate(&low_rise_input("1991-04-01"));
        assert_eq!(r.deviation_rate, 0.902);
        assert!(r.evaluation_level > UPPER_EVALUATION_LEVEL);
        assert_eq!(r.details.correction_band, CorrectionBand::AboveBand);
        assert_relative_eq!(r.sectional_correction_rate, 0.902 * 0.6);
        assert_relative_eq!(r.sectional_building_price, 5_412_000.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_exclusive_area_propagates_infinity() {
        let input = ValuationInput {
            exclusive_area: 0.0,
            ..reference_input()
        };
        let r = evaluate(&input);
        assert!(!r.details.share_narrowness_degree.is_finite());
        assert!(!r.details.d.is_finite());
    }

    #[test]
    fn zero_rates_leave_land_value_undiscounted() {
        let no_leasehold = ValuationInput {
            leasehold_rate: 0.0,
            ..reference_input()
        };
        let r = evaluate(&no_leasehold);
        assert_eq!(r.leased_land_value, r.land_right_value);

        let no_rental = ValuationInput {
            rental_rate: 0.0,
            ..reference_input()
        };
        let r = evaluate(&no_rental);
        assert_eq!(r.leased_land_value, r.land_right_value);
    }

    #[test]
    fn full_leasehold_discounts_land_value() {
        let input = ValuationInput {
            leasehold_rate: 1.0,
            rental_rate: 100.0,
            ..reference_input()
        };
        let r = evaluate(&input);
        assert!(r.leased_land_value < r.land_right_value);
        assert_relative_eq!(r.leased_land_value, r.land_right_value * 0.7, epsilon = 1e-6);
    }

    #[test]
    fn custom_rent_right_rate_is_used() {
        let engine = ValuationEngine::new(RateConstants {
            rent_right_rate: 0.4,
            ..RateConstants::default()
        });
        let default = evaluate(&reference_input());
        let r = engine.evaluate(&reference_input());
        assert_eq!(r.sectional_building_price, default.sectional_building_price);
        assert_relative_eq!(
            r.rental_building_price,
            r.sectional_building_price * 0.6,
            epsilon = 1e-6
        );
        assert!(r.leased_land_value < default.leased_land_value);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let input = reference_input();
        assert_eq!(evaluate(&input), evaluate(&input));
    }

    #[test]
    fn details_serialize_with_letter_names() {
        let r = evaluate(&reference_input());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["details"]["B"], 0.072);
        assert_eq!(json["details"]["correctionBand"], "belowBand");
        assert_eq!(json["landRightArea"], 23.35);
        assert!(json["details"].get("landRightAreaD").is_none());
    }
}
