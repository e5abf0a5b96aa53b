//! JSON input adapter.
//!
//! Reads a `ValuationInput` document that uses the camelCase wire names.

use std::fs;
use std::path::Path;

use crate::domain::error::ValuationError;
use crate::domain::input::ValuationInput;

pub fn read_input<P: AsRef<Path>>(path: P) -> Result<ValuationInput, ValuationError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_input(&content).map_err(|reason| ValuationError::InputParse {
        file: path.display().to_string(),
        reason,
    })
}

pub fn parse_input(content: &str) -> Result<ValuationInput, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}
