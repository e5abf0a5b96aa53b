//! JSON report adapter implementing ReportPort.
//!
//! Emits the input record and the full result, including the calculation
//! details, as one pretty-printed document. NaN and infinities become `null`.

use serde::Serialize;

use crate::domain::error::ValuationError;
use crate::domain::input::ValuationInput;
use crate::domain::valuation::ValuationResult;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct ReportDocument<'a> {
    input: &'a ValuationInput,
    result: &'a ValuationResult,
}

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(
        &self,
        input: &ValuationInput,
        result: &ValuationResult,
    ) -> Result<String, ValuationError> {
        let document = ReportDocument { input, result };
        let mut json =
            serde_json::to_string_pretty(&document).map_err(|e| ValuationError::Report {
                reason: e.to_string(),
            })?;
        json.push('\n');
        Ok(json)
    }
}
