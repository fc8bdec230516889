//! Ledger access port trait.
//!
//! Supplies the raw records (trades, daily targets, transactions, budgets,
//! goals) that the domain calculations consume. Date ranges are inclusive.

use crate::domain::budget::Budget;
use crate::domain::error::FinboardError;
use crate::domain::goal::FinancialGoal;
use crate::domain::target::DailyTargetRecord;
use crate::domain::trade::TradeEvent;
use crate::domain::transaction::Transaction;
use chrono::NaiveDate;

pub trait LedgerPort {
    fn fetch_trades(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<TradeEvent>, FinboardError>;

    fn fetch_targets(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyTargetRecord>, FinboardError>;

    fn fetch_transactions(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>, FinboardError>;

    fn fetch_budgets(&self) -> Result<Vec<Budget>, FinboardError>;

    fn fetch_goals(&self) -> Result<Vec<FinancialGoal>, FinboardError>;

    /// The target stored for `date`, if any.
    fn fetch_target(&self, date: NaiveDate) -> Result<Option<DailyTargetRecord>, FinboardError> {
        Ok(self.fetch_targets(date, date)?.into_iter().next())
    }
}
