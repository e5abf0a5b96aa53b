//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod json_input_adapter;
pub mod json_report_adapter;
pub mod text_report_adapter;
