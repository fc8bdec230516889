//! Aggregate trading statistics over a set of trade events.

use super::error::FinboardError;
use super::trade::{TradeEvent, TradeKind};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate_pct: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub net_profit: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub profit_factor: f64,
}

impl TradeStats {
    pub fn compute(events: &[TradeEvent]) -> Result<Self, FinboardError> {
        for event in events {
            event.validate()?;
        }

        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for event in events {
            match event.kind {
                TradeKind::Win => {
                    wins += 1;
                    gross_profit += event.amount;
                    largest_win = largest_win.max(event.amount);
                }
                TradeKind::Loss => {
                    losses += 1;
                    gross_loss += event.amount;
                    largest_loss = largest_loss.max(event.amount);
                }
            }
        }

        if !gross_profit.is_finite() || !gross_loss.is_finite() {
            return Err(FinboardError::invalid("amount", "trade totals overflow"));
        }

        let total_trades = wins + losses;
        let win_rate_pct = if total_trades > 0 {
            wins as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let avg_win = if wins > 0 {
            gross_profit / wins as f64
        } else {
            0.0
        };

        let avg_loss = if losses > 0 {
            gross_loss / losses as f64
        } else {
            0.0
        };

        Ok(TradeStats {
            total_trades,
            wins,
            losses,
            win_rate_pct,
            gross_profit,
            gross_loss,
            net_profit: gross_profit - gross_loss,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            profit_factor,
        })
    }
}
