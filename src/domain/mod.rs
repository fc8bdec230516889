//! Core domain types and calculations.

pub mod trade;
pub mod target;
pub mod trade_stats;
pub mod period_summary;
pub mod projection;
pub mod strategy;
pub mod transaction;
pub mod budget;
pub mod goal;
pub mod config_validation;
pub mod error;
