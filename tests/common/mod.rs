#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use finboard::domain::budget::{Budget, BudgetPeriod};
use finboard::domain::error::FinboardError;
use finboard::domain::goal::{FinancialGoal, GoalPriority};
use finboard::domain::target::{DailyTargetGoals, DailyTargetRecord};
use finboard::domain::trade::{TradeEvent, TradeKind};
use finboard::domain::transaction::{Transaction, TransactionKind};
use finboard::ports::ledger_port::LedgerPort;
use std::io::Write;
use std::path::Path;

#[derive(Default)]
pub struct MockLedgerPort {
    pub trades: Vec<TradeEvent>,
    pub targets: Vec<DailyTargetRecord>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<FinancialGoal>,
    pub error: Option<String>,
}

impl MockLedgerPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trade(mut self, trade: TradeEvent) -> Self {
        self.trades.push(trade);
        self
    }

    pub fn with_target(mut self, target: DailyTargetRecord) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_transaction(mut self, tx: Transaction) -> Self {
        self.transactions.push(tx);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    fn check(&self) -> Result<(), FinboardError> {
        match &self.error {
            Some(reason) => Err(FinboardError::Data {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl LedgerPort for MockLedgerPort {
    fn fetch_trades(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<TradeEvent>, FinboardError> {
        self.check()?;
        Ok(self
            .trades
            .iter()
            .filter(|t| {
                t.trade_time
                    .map(|time| time.date() >= start_date && time.date() <= end_date)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn fetch_targets(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyTargetRecord>, FinboardError> {
        self.check()?;
        Ok(self
            .targets
            .iter()
            .filter(|t| t.date >= start_date && t.date <= end_date)
            .cloned()
            .collect())
    }

    fn fetch_transactions(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>, FinboardError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.date >= start_date && t.date <= end_date)
            .cloned()
            .collect())
    }

    fn fetch_budgets(&self) -> Result<Vec<Budget>, FinboardError> {
        self.check()?;
        Ok(self.budgets.clone())
    }

    fn fetch_goals(&self) -> Result<Vec<FinancialGoal>, FinboardError> {
        self.check()?;
        Ok(self.goals.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 0, 0).unwrap()
}

pub fn trade_at(kind: TradeKind, amount: f64, time: NaiveDateTime) -> TradeEvent {
    let mut trade = match kind {
        TradeKind::Win => TradeEvent::win(amount),
        TradeKind::Loss => TradeEvent::loss(amount),
    };
    trade.trade_time = Some(time);
    trade
}

pub fn target_on(day: NaiveDate, income: f64, expense: f64, savings: f64) -> DailyTargetRecord {
    DailyTargetRecord {
        date: day,
        goals: DailyTargetGoals::new(income, expense, savings),
        actual_savings: 0.0,
    }
}

pub fn expense(day: NaiveDate, category: &str, amount: f64) -> Transaction {
    Transaction {
        kind: TransactionKind::Expense,
        amount,
        category: category.to_string(),
        description: None,
        date: day,
        tags: Vec::new(),
    }
}

pub fn income(day: NaiveDate, category: &str, amount: f64) -> Transaction {
    Transaction {
        kind: TransactionKind::Income,
        ..expense(day, category, amount)
    }
}

pub fn monthly_budget(category: &str, amount: f64) -> Budget {
    Budget {
        category: category.to_string(),
        amount,
        period: BudgetPeriod::Monthly,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 31),
        is_recurring: true,
    }
}

pub fn goal(title: &str, target: f64, current: f64) -> FinancialGoal {
    FinancialGoal {
        title: title.to_string(),
        target_amount: target,
        current_amount: current,
        start_date: date(2024, 1, 1),
        target_date: date(2024, 12, 31),
        category: None,
        priority: GoalPriority::Medium,
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}
