//! Plain-text report adapter implementing ReportPort.
//!
//! Prints the self-use and rented totals and, optionally, every intermediate
//! step of the calculation in the order it was performed.

use std::fmt::Write;

use crate::domain::error::ValuationError;
use crate::domain::input::ValuationInput;
use crate::domain::valuation::{CorrectionBand, ValuationResult};
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    pub show_details: bool,
}

impl TextReportAdapter {
    pub fn new(show_details: bool) -> Self {
        Self { show_details }
    }

    fn render_into(
        &self,
        out: &mut String,
        input: &ValuationInput,
        result: &ValuationResult,
    ) -> std::fmt::Result {
        render_summary(out, result)?;
        if self.show_details {
            writeln!(out)?;
            render_details(out, input, result)?;
        }
        Ok(())
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Group the integer digits of `value` in threes after rounding to `decimals`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_yen(value: f64) -> String {
    format!("{} JPY", format_grouped(value, 0))
}

pub fn format_area(value: f64) -> String {
    format!("{} m²", format_grouped(value, 2))
}

fn band_label(band: CorrectionBand) -> &'static str {
    match band {
        CorrectionBand::BelowBand => "below band, corrected",
        CorrectionBand::WithinBand => "within band, not corrected",
        CorrectionBand::AboveBand => "above band, corrected",
    }
}

fn render_summary(out: &mut String, result: &ValuationResult) -> std::fmt::Result {
    writeln!(out, "Self-use")?;
    writeln!(
        out,
        "  Sectional ownership (building): {}",
        format_yen(result.sectional_building_price)
    )?;
    writeln!(
        out,
        "  Land-use right (land):          {}",
        format_yen(result.land_right_value)
    )?;
    writeln!(out, "  Total:                          {}", format_yen(result.total_self))?;
    writeln!(out)?;
    writeln!(out, "Rented")?;
    writeln!(
        out,
        "  Sectional ownership (building): {}",
        format_yen(result.rental_building_price)
    )?;
    writeln!(
        out,
        "  Land-use right (land):          {}",
        format_yen(result.leased_land_value)
    )?;
    writeln!(out, "  Total:                          {}", format_yen(result.total_rental))?;
    Ok(())
}

fn render_details(
    out: &mut String,
    input: &ValuationInput,
    result: &ValuationResult,
) -> std::fmt::Result {
    let d = &result.details;
    writeln!(out, "Calculation details")?;
    writeln!(
        out,
        "  Building age: {} -> {} years (rounded up)",
        d.building_age_raw, result.building_age
    )?;
    writeln!(
        out,
        "  Land-use right area: {} -> {} (rounded up at 2 decimals)",
        d.land_right_area_raw,
        format_area(result.land_right_area)
    )?;
    writeln!(
        out,
        "  Land-use right price: {} -> {} (rounded half up)",
        format_grouped(d.land_right_price_raw, 2),
        format_yen(result.land_right_price)
    )?;
    writeln!(out, "  A = building age x (-0.033): {:.3}", d.a)?;
    writeln!(
        out,
        "  Total floors index ({} floors): {:.3}",
        input.total_floors, d.total_floors_index
    )?;
    writeln!(out, "  B = total floors index x 0.239: {:.3}", d.b)?;
    writeln!(out, "  C = floor ({}) x 0.018: {:.3}", input.floor, d.c)?;
    writeln!(out, "  Land share narrowness: {:.3}", d.share_narrowness_degree)?;
    writeln!(out, "  D = narrowness x (-1.195): {:.3}", d.d)?;
    writeln!(
        out,
        "  Deviation rate: {} -> {:.3}",
        d.deviation_rate_raw, result.deviation_rate
    )?;
    writeln!(out, "  Evaluation level: {}", result.evaluation_level)?;
    writeln!(
        out,
        "  Sectional correction rate: {} ({})",
        result.sectional_correction_rate,
        band_label(d.correction_band)
    )?;
    writeln!(out, "  Sectional ownership (self-use): {}", result.sectional_building_price)?;
    writeln!(out, "  Land-use right (self-use): {}", result.land_right_value)?;
    writeln!(out, "  Sectional ownership (rented): {}", result.rental_building_price)?;
    writeln!(out, "  Land-use right (leased): {}", result.leased_land_value)?;
    writeln!(out, "  Total (self-use): {}", result.total_self)?;
    writeln!(out, "  Total (rented): {}", result.total_rental)?;
    Ok(())
}

impl ReportPort for TextReportAdapter {
    fn render(
        &self,
        input: &ValuationInput,
        result: &ValuationResult,
    ) -> Result<String, ValuationError> {
        let mut out = String::new();
        self.render_into(&mut out, input, result)
            .map_err(|e| ValuationError::Report {
                reason: e.to_string(),
            })?;
        Ok(out)
    }
}
