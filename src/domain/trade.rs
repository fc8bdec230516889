//! Trade events recorded against a daily target.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use super::error::{ensure_positive, FinboardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TradeKind {
    Win,
    Loss,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Win => write!(f, "win"),
            TradeKind::Loss => write!(f, "loss"),
        }
    }
}

impl FromStr for TradeKind {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(TradeKind::Win),
            "loss" => Ok(TradeKind::Loss),
            other => Err(FinboardError::invalid(
                "type",
                format!("unknown trade type '{other}' (expected win or loss)"),
            )),
        }
    }
}

/// A single win or loss. `amount` is always a positive magnitude; the sign
/// lives in `kind`. The descriptive fields are never read by calculations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeEvent {
    pub kind: TradeKind,
    pub amount: f64,
    pub trade_time: Option<NaiveDateTime>,
    pub symbol: Option<String>,
    pub pips: Option<f64>,
    pub lot_size: Option<f64>,
    pub description: Option<String>,
}

impl TradeEvent {
    pub fn win(amount: f64) -> Self {
        Self::bare(TradeKind::Win, amount)
    }

    pub fn loss(amount: f64) -> Self {
        Self::bare(TradeKind::Loss, amount)
    }

    fn bare(kind: TradeKind, amount: f64) -> Self {
        TradeEvent {
            kind,
            amount,
            trade_time: None,
            symbol: None,
            pips: None,
            lot_size: None,
            description: None,
        }
    }

    pub fn is_win(&self) -> bool {
        self.kind == TradeKind::Win
    }

    pub fn validate(&self) -> Result<(), FinboardError> {
        ensure_positive("amount", self.amount)
    }

    /// Signed result: positive for wins, negative for losses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TradeKind::Win => self.amount,
            TradeKind::Loss => -self.amount,
        }
    }
}
