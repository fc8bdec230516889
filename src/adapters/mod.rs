//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
#[cfg(feature = "serde")]
pub mod json_report_adapter;
pub mod markdown_report_adapter;
