//! Report generation port trait.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::error::ValuationError;
use crate::domain::input::ValuationInput;
use crate::domain::valuation::ValuationResult;

/// Port for rendering a valuation and writing it out.
pub trait ReportPort {
    fn render(
        &self,
        input: &ValuationInput,
        result: &ValuationResult,
    ) -> Result<String, ValuationError>;

    /// Default implementation: writes the rendered report to `output_path`,
    /// or to stdout when no path is given.
    fn write(
        &self,
        input: &ValuationInput,
        result: &ValuationResult,
        output_path: Option<&Path>,
    ) -> Result<(), ValuationError> {
        let content = self.render(input, result)?;
        match output_path {
            Some(path) => fs::write(path, content)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
