//! Integration tests for the calculation core.
//!
//! Tests cover:
//! - Target progress properties (neutrality, additivity, bounds, completion)
//! - Projection properties (conservation, zero return, reference scenarios)
//! - Period roll-ups and budget/goal flows through a mock ledger

mod common;

use approx::assert_relative_eq;
use common::*;
use finboard::cli::{period_progress, target_progress};
use finboard::domain::budget::{budget_alerts, BudgetStatus, BudgetSummary, BudgetUsage};
use finboard::domain::error::FinboardError;
use finboard::domain::goal::{GoalProgress, GoalsSummary};
use finboard::domain::period_summary::{period_bounds, Period, PeriodSummary};
use finboard::domain::projection::{project, project_with_limit, StrategyInput};
use finboard::domain::strategy::{BacktestStrategy, StrategyKind, StrategyStatus};
use finboard::domain::target::{compute_progress, DailyTargetGoals};
use finboard::domain::trade::{TradeEvent, TradeKind};
use proptest::prelude::*;

fn arb_trade() -> impl Strategy<Value = TradeEvent> {
    (any::<bool>(), 0.01f64..1_000_000.0).prop_map(|(win, amount)| {
        if win {
            TradeEvent::win(amount)
        } else {
            TradeEvent::loss(amount)
        }
    })
}

fn arb_goals() -> impl Strategy<Value = DailyTargetGoals> {
    (0.0f64..5_000_000.0, 0.0f64..5_000_000.0, 0.0f64..1_000_000.0)
        .prop_map(|(i, e, s)| DailyTargetGoals::new(i, e, s))
}

mod target_properties {
    use super::*;

    #[test]
    fn zero_events_are_neutral() {
        let goals = DailyTargetGoals::new(1_000_000.0, 500_000.0, 0.0);
        let progress = compute_progress(&goals, &[]).unwrap();
        assert_eq!(progress.actual_income, 0.0);
        assert_eq!(progress.actual_expense, 0.0);
        assert_eq!(progress.total_trades, 0);
        assert_eq!(progress.win_rate_pct, 0.0);
        assert!(!progress.is_completed);
    }

    #[test]
    fn completion_at_exact_threshold() {
        let goals = DailyTargetGoals::new(1_000_000.0, 0.0, 0.0);
        let below = compute_progress(&goals, &[TradeEvent::win(999_999.99)]).unwrap();
        assert!(!below.is_completed);
        let exact = compute_progress(&goals, &[TradeEvent::win(1_000_000.0)]).unwrap();
        assert!(exact.is_completed);
    }

    #[test]
    fn invalid_inputs_name_the_field() {
        let err = compute_progress(&DailyTargetGoals::new(0.0, -1.0, 0.0), &[]).unwrap_err();
        assert!(matches!(
            err,
            FinboardError::InvalidArgument { field, .. } if field == "expense_limit"
        ));

        let err = compute_progress(
            &DailyTargetGoals::new(10.0, 0.0, 0.0),
            &[TradeEvent::win(f64::NAN)],
        )
        .unwrap_err();
        assert!(matches!(err, FinboardError::InvalidArgument { field, .. } if field == "amount"));
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let goals = DailyTargetGoals::new(1.0, 1.0, 0.0);
        let trades = [TradeEvent::win(f64::MAX), TradeEvent::win(f64::MAX)];
        let err = compute_progress(&goals, &trades).unwrap_err();
        assert!(matches!(err, FinboardError::InvalidArgument { field, .. } if field == "amount"));
    }

    proptest! {
        #[test]
        fn income_and_expense_are_additive(
            goals in arb_goals(),
            trades in prop::collection::vec(arb_trade(), 0..50),
        ) {
            let progress = compute_progress(&goals, &trades).unwrap();
            let sum_of = |kind: TradeKind| -> f64 {
                trades.iter().filter(|t| t.kind == kind).map(|t| t.amount).sum()
            };
            let wins = sum_of(TradeKind::Win);
            let losses = sum_of(TradeKind::Loss);
            prop_assert!((progress.actual_income - wins).abs() <= 1e-6 * wins.max(1.0));
            prop_assert!((progress.actual_expense - losses).abs() <= 1e-6 * losses.max(1.0));
            prop_assert_eq!(progress.win_count + progress.loss_count, trades.len());
        }

        #[test]
        fn remaining_is_never_negative(
            goals in arb_goals(),
            trades in prop::collection::vec(arb_trade(), 0..50),
        ) {
            let progress = compute_progress(&goals, &trades).unwrap();
            prop_assert!(progress.remaining_income >= 0.0);
            prop_assert!(progress.remaining_expense >= 0.0);
        }

        #[test]
        fn win_rate_is_bounded(
            goals in arb_goals(),
            trades in prop::collection::vec(arb_trade(), 0..50),
        ) {
            let progress = compute_progress(&goals, &trades).unwrap();
            prop_assert!(progress.win_rate_pct >= 0.0);
            prop_assert!(progress.win_rate_pct <= 100.0);
        }

        #[test]
        fn completion_matches_income_or_loss_limit(
            goals in arb_goals(),
            trades in prop::collection::vec(arb_trade(), 0..20),
        ) {
            let progress = compute_progress(&goals, &trades).unwrap();
            let expected = progress.actual_income >= goals.income_target
                || (goals.expense_limit > 0.0 && progress.actual_expense >= goals.expense_limit);
            prop_assert_eq!(progress.is_completed, expected);
        }
    }
}

mod projection_properties {
    use super::*;

    fn input(initial: f64, monthly: f64, rate: f64, months: u32) -> StrategyInput {
        StrategyInput {
            initial_amount: initial,
            monthly_contribution: monthly,
            expected_annual_return_pct: rate,
            duration_months: months,
        }
    }

    #[test]
    fn single_month_at_twelve_percent() {
        let projection = project(&input(1_000_000.0, 0.0, 12.0, 1)).unwrap();
        assert_relative_eq!(projection.monthly_breakdown[0].returns, 10_000.0);
        assert_relative_eq!(projection.final_amount, 1_010_000.0);
    }

    #[test]
    fn twelve_months_of_contributions_at_eight_percent() {
        let projection = project(&input(0.0, 1_000_000.0, 8.0, 12)).unwrap();
        assert_relative_eq!(projection.total_contributed, 12_000_000.0);
        assert_relative_eq!(projection.final_amount, 12_532_925.527934123, max_relative = 1e-9);
        assert_relative_eq!(projection.total_returns, 532_925.5279341224, max_relative = 1e-9);
        assert_eq!(projection.monthly_breakdown.len(), 12);
    }

    #[test]
    fn zero_return_accumulates_contributions_only() {
        let projection = project(&input(500.0, 100.0, 0.0, 24)).unwrap();
        assert_eq!(projection.total_returns, 0.0);
        assert_relative_eq!(projection.final_amount, 500.0 + 2_400.0);
    }

    #[test]
    fn validation_failures() {
        assert!(project(&input(0.0, 100.0, 5.0, 0)).is_err());
        assert!(project(&input(-1.0, 100.0, 5.0, 12)).is_err());
        assert!(project(&input(0.0, -100.0, 5.0, 12)).is_err());
        assert!(project(&input(0.0, 100.0, f64::INFINITY, 12)).is_err());
        assert!(project_with_limit(&input(0.0, 100.0, 5.0, 13), 12).is_err());
    }

    proptest! {
        #[test]
        fn balance_is_conserved(
            initial in 0.0f64..10_000_000.0,
            monthly in 0.0f64..1_000_000.0,
            rate in -50.0f64..50.0,
            months in 1u32..240,
        ) {
            let projection = project(&input(initial, monthly, rate, months)).unwrap();
            let expected = initial + projection.total_contributed + projection.total_returns;
            let tolerance = 1e-6 * expected.abs().max(1.0);
            prop_assert!((projection.final_amount - expected).abs() <= tolerance);
            prop_assert_eq!(projection.monthly_breakdown.len(), months as usize);
            let last = projection.monthly_breakdown.last().unwrap();
            prop_assert_eq!(last.balance, projection.final_amount);
        }

        #[test]
        fn extreme_rates_never_return_non_finite(
            rate in -200_000.0f64..200_000.0,
            months in 1u32..1200,
        ) {
            if let Ok(projection) = project(&input(1.0, 1.0, rate, months)) {
                prop_assert!(projection.final_amount.is_finite());
                prop_assert!(projection.total_returns.is_finite());
            }
        }
    }
}

mod strategy_lifecycle {
    use super::*;

    #[test]
    fn run_activate_complete_reports_gap() {
        let input = StrategyInput {
            initial_amount: 1_000_000.0,
            monthly_contribution: 0.0,
            expected_annual_return_pct: 12.0,
            duration_months: 1,
        };
        let mut strategy = BacktestStrategy::new("Deposit".into(), StrategyKind::Savings, input);
        strategy.run(1200).unwrap();
        strategy.activate().unwrap();
        strategy.complete(1_005_000.0).unwrap();

        assert_eq!(strategy.status, StrategyStatus::Completed);
        assert_relative_eq!(strategy.performance_gap().unwrap(), -5_000.0, epsilon = 1e-6);
        assert!(matches!(
            strategy.run(1200),
            Err(FinboardError::InvalidTransition { .. })
        ));
    }
}

mod ledger_flows {
    use super::*;

    #[test]
    fn target_progress_uses_stored_target_and_day_trades() {
        let ledger = MockLedgerPort::new()
            .with_target(target_on(date(2024, 1, 15), 1_000.0, 500.0, 100.0))
            .with_trade(trade_at(TradeKind::Win, 600.0, at(2024, 1, 15, 9)))
            .with_trade(trade_at(TradeKind::Loss, 100.0, at(2024, 1, 15, 11)))
            .with_trade(trade_at(TradeKind::Win, 999.0, at(2024, 1, 16, 9)));

        let (progress, trades) = target_progress(&ledger, None, date(2024, 1, 15)).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(progress.actual_income, 600.0);
        assert_eq!(progress.actual_expense, 100.0);
        assert!(!progress.is_completed);
    }

    #[test]
    fn target_progress_falls_back_to_config_goals() {
        let ledger = MockLedgerPort::new()
            .with_trade(trade_at(TradeKind::Win, 50.0, at(2024, 2, 1, 10)));
        let fallback = DailyTargetGoals::new(50.0, 0.0, 0.0);

        let (progress, _) = target_progress(&ledger, Some(&fallback), date(2024, 2, 1)).unwrap();
        assert!(progress.is_completed);

        let err = target_progress(&ledger, None, date(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, FinboardError::Data { .. }));
    }

    #[test]
    fn ledger_errors_propagate() {
        let ledger = MockLedgerPort::new().with_error("disk on fire");
        let err = target_progress(&ledger, None, date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, FinboardError::Data { reason } if reason == "disk on fire"));
    }

    #[test]
    fn week_summary_rolls_up_days() {
        let ledger = MockLedgerPort::new()
            .with_target(target_on(date(2024, 1, 15), 100.0, 50.0, 0.0))
            .with_target(target_on(date(2024, 1, 16), 100.0, 50.0, 0.0))
            .with_target(target_on(date(2024, 1, 22), 100.0, 50.0, 0.0))
            .with_trade(trade_at(TradeKind::Win, 120.0, at(2024, 1, 15, 9)))
            .with_trade(trade_at(TradeKind::Loss, 60.0, at(2024, 1, 16, 9)))
            .with_trade(trade_at(TradeKind::Win, 10.0, at(2024, 1, 17, 9)));

        let (start, end) = period_bounds(Period::Week, date(2024, 1, 17)).unwrap();
        assert_eq!((start, end), (date(2024, 1, 15), date(2024, 1, 21)));

        let days = period_progress(&ledger, start, end).unwrap();
        assert_eq!(days.len(), 2);

        let summary = PeriodSummary::compute(&days);
        assert_eq!(summary.days_met_income, 1);
        assert_eq!(summary.days_within_expense, 1);
        assert_eq!(summary.days_completed, 2);
        assert_relative_eq!(summary.net, 60.0);
        assert_relative_eq!(summary.win_rate_pct, 50.0);
    }

    #[test]
    fn budgets_and_alerts_from_transactions() {
        let transactions = vec![
            expense(date(2024, 1, 5), "Food", 700.0),
            expense(date(2024, 1, 20), "food", 250.0),
            expense(date(2024, 2, 1), "Food", 999.0),
            expense(date(2024, 1, 8), "Transport", 100.0),
            income(date(2024, 1, 1), "Food", 5_000.0),
        ];
        let budgets = vec![monthly_budget("Food", 1_000.0), monthly_budget("Transport", 500.0)];

        let usages: Vec<BudgetUsage> = budgets
            .iter()
            .map(|b| BudgetUsage::compute(b, &transactions).unwrap())
            .collect();

        assert_relative_eq!(usages[0].spent, 950.0);
        assert_eq!(usages[0].status, BudgetStatus::Critical);
        assert_relative_eq!(usages[1].percentage, 20.0);
        assert_eq!(usages[1].status, BudgetStatus::Good);

        let alerts = budget_alerts(&usages, 80.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].budget.category, "Food");

        let summary = BudgetSummary::compute(&usages);
        assert_relative_eq!(summary.total_allocated, 1_500.0);
        assert_relative_eq!(summary.total_spent, 1_050.0);
        assert_eq!(summary.over_budget_count, 0);
    }

    #[test]
    fn goals_progress_and_summary() {
        let goals = vec![
            goal("Emergency fund", 10_000.0, 2_500.0),
            goal("Laptop", 2_000.0, 2_000.0),
        ];

        let progress = GoalProgress::compute(&goals[0], date(2024, 12, 1)).unwrap();
        assert_relative_eq!(progress.progress_pct, 25.0);
        assert_eq!(progress.days_remaining, 30);
        assert_relative_eq!(progress.required_per_day, 250.0);

        let summary = GoalsSummary::compute(&goals).unwrap();
        assert_eq!(summary.completed_goals, 1);
        assert_eq!(summary.active_goals, 1);
        assert_relative_eq!(summary.overall_progress_pct, 4_500.0 / 12_000.0 * 100.0);
    }
}
