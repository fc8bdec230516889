//! Income/expense transactions and their summaries.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use super::error::{ensure_positive, FinboardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FinboardError::invalid(
                "type",
                format!("unknown transaction type '{other}' (expected income or expense)"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn validate(&self) -> Result<(), FinboardError> {
        ensure_positive("amount", self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
}

impl TransactionSummary {
    pub fn compute(transactions: &[Transaction]) -> Result<Self, FinboardError> {
        let mut summary = TransactionSummary::default();
        for tx in transactions {
            tx.validate()?;
            match tx.kind {
                TransactionKind::Income => summary.total_income += tx.amount,
                TransactionKind::Expense => summary.total_expense += tx.amount,
            }
        }
        summary.net_balance = summary.total_income - summary.total_expense;
        Ok(summary)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub share_pct: f64,
}

/// Totals per category for one transaction kind, largest first. Categories
/// are grouped case-insensitively, the same way budgets match them, and keep
/// the spelling first seen. Ties are broken by category name.
pub fn category_breakdown(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Result<Vec<CategoryTotal>, FinboardError> {
    let mut totals: HashMap<String, (&str, f64, usize)> = HashMap::new();
    let mut grand_total = 0.0_f64;

    for tx in transactions.iter().filter(|t| t.kind == kind) {
        tx.validate()?;
        let entry = totals
            .entry(tx.category.to_lowercase())
            .or_insert((tx.category.as_str(), 0.0, 0));
        entry.1 += tx.amount;
        entry.2 += 1;
        grand_total += tx.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_values()
        .map(|(category, total, count)| CategoryTotal {
            category: category.to_string(),
            total,
            count,
            share_pct: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(breakdown)
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Income, expense and net per calendar month, oldest first. When `months`
/// is given only the most recent that many months with activity are kept.
pub fn monthly_trend(
    transactions: &[Transaction],
    months: Option<usize>,
) -> Result<Vec<MonthlyTrend>, FinboardError> {
    let mut by_month: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        tx.validate()?;
        let entry = by_month
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((0.0, 0.0));
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            TransactionKind::Expense => entry.1 += tx.amount,
        }
    }

    let mut trend: Vec<MonthlyTrend> = by_month
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTrend {
            year,
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect();

    if let Some(n) = months {
        if trend.len() > n {
            trend.drain(..trend.len() - n);
        }
    }
    Ok(trend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TransactionKind, amount: f64, category: &str, date: &str) -> Transaction {
        Transaction {
            kind,
            amount,
            category: category.to_string(),
            description: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tags: Vec::new(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(TransactionKind::Income, 5_000.0, "salary", "2024-01-01"),
            tx(TransactionKind::Expense, 1_200.0, "rent", "2024-01-03"),
            tx(TransactionKind::Expense, 300.0, "food", "2024-01-10"),
            tx(TransactionKind::Expense, 200.0, "food", "2024-02-02"),
            tx(TransactionKind::Income, 5_000.0, "salary", "2024-02-01"),
        ]
    }

    #[test]
    fn summary_totals() {
        let summary = TransactionSummary::compute(&sample()).unwrap();
        assert_eq!(summary.total_income, 10_000.0);
        assert_eq!(summary.total_expense, 1_700.0);
        assert_eq!(summary.net_balance, 8_300.0);
    }

    #[test]
    fn empty_summary_is_zero() {
        assert_eq!(
            TransactionSummary::compute(&[]).unwrap(),
            TransactionSummary::default()
        );
    }

    #[test]
    fn breakdown_sorted_by_total() {
        let breakdown = category_breakdown(&sample(), TransactionKind::Expense).unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "rent");
        assert_eq!(breakdown[1].category, "food");
        assert_eq!(breakdown[1].count, 2);
        assert_eq!(breakdown[1].total, 500.0);
        assert!((breakdown[0].share_pct - 1_200.0 / 1_700.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_groups_categories_case_insensitively() {
        let txs = vec![
            tx(TransactionKind::Expense, 700.0, "Food", "2024-01-05"),
            tx(TransactionKind::Expense, 250.0, "food", "2024-01-20"),
            tx(TransactionKind::Expense, 100.0, "Transport", "2024-01-08"),
        ];
        let breakdown = category_breakdown(&txs, TransactionKind::Expense).unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[0].total, 950.0);
    }

    #[test]
    fn trend_is_chronological() {
        let trend = monthly_trend(&sample(), None).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!((trend[0].year, trend[0].month), (2024, 1));
        assert_eq!(trend[0].net, 3_500.0);
        assert_eq!(trend[1].expense, 200.0);
    }

    #[test]
    fn trend_keeps_most_recent_months() {
        let trend = monthly_trend(&sample(), Some(1)).unwrap();
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].month, 2);
    }

    #[test]
    fn invalid_amount_rejected() {
        let bad = vec![tx(TransactionKind::Income, 0.0, "x", "2024-01-01")];
        assert!(TransactionSummary::compute(&bad).is_err());
    }

    #[test]
    fn parses_kind() {
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}
