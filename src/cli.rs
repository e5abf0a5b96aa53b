//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_input_adapter::read_input;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{
    REPORT_SECTION, validate_rates_config, validate_report_config,
};
use crate::domain::error::ValuationError;
use crate::domain::input::{Field, ValuationInput};
use crate::domain::validation::{ValidationErrors, validate};
use crate::domain::valuation::{RateConstants, ValuationEngine, ValuationResult};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KUBUN_VALUATION_LOG";

pub const VALUATION_SECTION: &str = "valuation";

#[derive(Parser, Debug)]
#[command(
    name = "kubun-valuation",
    about = "Sectional ownership valuation of condominium units"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a unit and print its valuation
    Evaluate {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        rates: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_details: bool,
    },
    /// Check a unit's input without evaluating it
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub format: ReportFormat,
    pub show_details: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            show_details: true,
        }
    }
}

/// A validated input together with its valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub input: ValuationInput,
    pub result: ValuationResult,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Evaluate {
            input,
            rates,
            format,
            output,
            no_details,
        } => run_evaluate(
            &input,
            rates.as_deref(),
            format,
            output.as_deref(),
            no_details,
        ),
        Command::Validate { input } => run_validate(&input),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            (&e).into()
        }
    }
}

fn print_error(err: &ValuationError) {
    match err {
        ValuationError::Validation(errors) => {
            eprintln!("error: invalid input");
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}

/// Validate, then evaluate. The engine is not run when validation fails.
pub fn appraise(
    engine: &ValuationEngine,
    input: ValuationInput,
) -> Result<Appraisal, ValidationErrors> {
    let input = validate(input)?;
    let result = engine.evaluate(&input);
    Ok(Appraisal { input, result })
}

pub fn run_evaluate(
    input_path: &Path,
    rates_path: Option<&Path>,
    format_override: Option<ReportFormat>,
    output_path: Option<&Path>,
    no_details: bool,
) -> Result<(), ValuationError> {
    // Stage 1: Load input
    info!(path = %input_path.display(), "loading input");
    let input_config = if is_json(input_path) {
        None
    } else {
        Some(load_config(input_path)?)
    };
    let input = match &input_config {
        Some(config) => build_valuation_input(config)?,
        None => read_input(input_path)?,
    };

    // Stage 2: Resolve rates and report settings
    let rates_config = match rates_path {
        Some(path) => {
            info!(path = %path.display(), "loading rates");
            Some(load_config(path)?)
        }
        None => None,
    };
    let settings_config: Option<&dyn ConfigPort> = match (&rates_config, &input_config) {
        (Some(rates), _) => Some(rates as &dyn ConfigPort),
        (None, Some(input)) => Some(input as &dyn ConfigPort),
        (None, None) => None,
    };
    let (engine, mut settings) = match settings_config {
        Some(config) => (build_engine(config)?, build_report_settings(config)?),
        None => (ValuationEngine::default(), ReportSettings::default()),
    };
    if let Some(format) = format_override {
        settings.format = format;
    }
    if no_details {
        settings.show_details = false;
    }

    // Stage 3: Validate and evaluate
    let appraisal = appraise(&engine, input)?;
    info!(
        total_self = appraisal.result.total_self,
        total_rental = appraisal.result.total_rental,
        "valuation complete"
    );

    // Stage 4: Report
    let report = build_report_adapter(&settings);
    report.write(&appraisal.input, &appraisal.result, output_path)?;
    if let Some(path) = output_path {
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

pub fn run_validate(input_path: &Path) -> Result<(), ValuationError> {
    info!(path = %input_path.display(), "validating input");
    let input = load_input(input_path)?;
    validate(input)?;
    println!("input is valid");
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ValuationError> {
    FileConfigAdapter::from_file(path).map_err(|e| ValuationError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read an input record from a `.json` document or an INI `[valuation]` section.
pub fn load_input(path: &Path) -> Result<ValuationInput, ValuationError> {
    if is_json(path) {
        read_input(path)
    } else {
        let config = load_config(path)?;
        Ok(build_valuation_input(&config)?)
    }
}

/// Build an input record from the `[valuation]` section.
///
/// Only presence and number syntax are checked here; range rules are left to
/// [`validate`].
pub fn build_valuation_input(config: &dyn ConfigPort) -> Result<ValuationInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let input = ValuationInput {
        inheritance_date: read_text(config, Field::InheritanceDate, &mut errors),
        construction_date: read_text(config, Field::ConstructionDate, &mut errors),
        total_floors: read_whole(config, Field::TotalFloors, &mut errors),
        floor: read_whole(config, Field::Floor, &mut errors),
        exclusive_area: read_number(config, Field::ExclusiveArea, &mut errors),
        land_area: read_number(config, Field::LandArea, &mut errors),
        land_share_numerator: read_number(config, Field::LandShareNumerator, &mut errors),
        land_share_denominator: read_number(config, Field::LandShareDenominator, &mut errors),
        building_price: read_number(config, Field::BuildingPrice, &mut errors),
        road_price: read_number(config, Field::RoadPrice, &mut errors),
        road_price_rate: read_number(config, Field::RoadPriceRate, &mut errors),
        leasehold_rate: read_number(config, Field::LeaseholdRate, &mut errors),
        rental_rate: read_number(config, Field::RentalRate, &mut errors),
    };

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}

fn read_raw(
    config: &dyn ConfigPort,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = config.get_string(VALUATION_SECTION, field.ini_key());
    if value.is_none() {
        errors.insert(field, format!("{} is required", field.label()));
    }
    value
}

fn read_text(config: &dyn ConfigPort, field: Field, errors: &mut ValidationErrors) -> String {
    read_raw(config, field, errors)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

// Thousands separators are accepted, as in "6,148,686".
fn numeric_text(raw: &str) -> String {
    raw.trim().replace(',', "")
}

fn read_number(config: &dyn ConfigPort, field: Field, errors: &mut ValidationErrors) -> f64 {
    let Some(raw) = read_raw(config, field, errors) else {
        return f64::NAN;
    };
    match numeric_text(&raw).parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            errors.insert(field, format!("{} must be a number", field.label()));
            f64::NAN
        }
    }
}

fn read_whole(config: &dyn ConfigPort, field: Field, errors: &mut ValidationErrors) -> i64 {
    let Some(raw) = read_raw(config, field, errors) else {
        return 0;
    };
    let text = numeric_text(&raw);
    match text.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            let reason = if text.parse::<f64>().is_ok() {
                "must be a whole number"
            } else {
                "must be a number"
            };
            errors.insert(field, format!("{} {reason}", field.label()));
            0
        }
    }
}

/// Rate constants from `[rates]`, defaulting absent keys.
pub fn build_rate_constants(config: &dyn ConfigPort) -> Result<RateConstants, ValuationError> {
    validate_rates_config(config)
}

pub fn build_engine(config: &dyn ConfigPort) -> Result<ValuationEngine, ValuationError> {
    Ok(ValuationEngine::new(build_rate_constants(config)?))
}

pub fn build_report_settings(config: &dyn ConfigPort) -> Result<ReportSettings, ValuationError> {
    validate_report_config(config)?;
    let format = match config.get_string(REPORT_SECTION, "format").as_deref().map(str::trim) {
        Some("json") => ReportFormat::Json,
        _ => ReportFormat::Text,
    };
    let show_details = config
        .get_flag(REPORT_SECTION, "details")
        .ok()
        .flatten()
        .unwrap_or(true);
    Ok(ReportSettings {
        format,
        show_details,
    })
}

pub fn build_report_adapter(settings: &ReportSettings) -> Box<dyn ReportPort> {
    match settings.format {
        ReportFormat::Text => Box::new(TextReportAdapter::new(settings.show_details)),
        ReportFormat::Json => Box::new(JsonReportAdapter),
    }
}
