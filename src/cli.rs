//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::markdown_report_adapter::{self, MarkdownReportAdapter};
use crate::domain::budget::{
    budget_alerts, BudgetSummary, BudgetUsage, DEFAULT_ALERT_THRESHOLD_PCT,
};
use crate::domain::config_validation::{
    read_number, validate_budget_config, validate_limits_config, validate_report_config,
    validate_strategy_config, validate_target_config,
};
use crate::domain::error::FinboardError;
use crate::domain::goal::{GoalProgress, GoalsSummary};
use crate::domain::period_summary::{period_bounds, Period, PeriodSummary};
use crate::domain::projection::{StrategyInput, DEFAULT_MAX_DURATION_MONTHS};
use crate::domain::strategy::{BacktestStrategy, StrategyKind};
use crate::domain::target::{compute_progress, DailyTargetGoals, DailyTargetProgress};
use crate::domain::trade::TradeEvent;
use crate::domain::trade_stats::TradeStats;
use crate::domain::transaction::{
    category_breakdown, monthly_trend, TransactionKind, TransactionSummary,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_port::LedgerPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "finboard", about = "Trading target and personal finance calculations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show progress of the daily trading target
    Progress {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Project a savings or investment strategy month by month
    Project {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Aggregate statistics over recorded trades
    Stats {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Week or month roll-up of daily targets
    Summary {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        period: Period,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Budget usage and alerts
    Budgets {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Progress of financial goals
    Goals {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Income and expense summary of transactions
    Transactions {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Progress {
            config,
            data,
            date,
            output,
        } => run_progress(&config, &data, date.unwrap_or_else(today), output.as_deref()),
        Command::Project { config, output } => run_project(&config, output.as_deref()),
        Command::Stats { data, from, to } => run_stats(&data, from, to),
        Command::Summary { data, period, date } => {
            run_summary(&data, period, date.unwrap_or_else(today))
        }
        Command::Budgets {
            config,
            data,
            threshold,
        } => run_budgets(config.as_deref(), &data, threshold),
        Command::Goals { data, date } => run_goals(&data, date.unwrap_or_else(today)),
        Command::Transactions { data, from, to } => run_transactions(&data, from, to),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            (&e).into()
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, FinboardError> {
    log::info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

fn open_ledger(path: &Path) -> CsvAdapter {
    log::info!("Reading ledger from {}", path.display());
    CsvAdapter::new(path.to_path_buf())
}

/// Daily target goals from the `[target]` section.
pub fn build_goals(config: &dyn ConfigPort) -> Result<DailyTargetGoals, FinboardError> {
    validate_target_config(config)?;
    Ok(DailyTargetGoals {
        income_target: read_number(config, "target", "income_target")?.unwrap_or(0.0),
        expense_limit: read_number(config, "target", "expense_limit")?.unwrap_or(0.0),
        savings_target: read_number(config, "target", "savings_target")?.unwrap_or(0.0),
    })
}

/// Strategy definition from the `[strategy]` section, in draft status.
pub fn build_strategy(config: &dyn ConfigPort) -> Result<BacktestStrategy, FinboardError> {
    validate_strategy_config(config)?;

    let input = StrategyInput {
        initial_amount: read_number(config, "strategy", "initial_amount")?.unwrap_or(0.0),
        monthly_contribution: read_number(config, "strategy", "monthly_contribution")?
            .unwrap_or(0.0),
        expected_annual_return_pct: read_number(config, "strategy", "expected_return")?
            .unwrap_or(0.0),
        duration_months: read_number(config, "strategy", "duration")?.unwrap_or(0.0) as u32,
    };

    let kind = match config.get_string("strategy", "type") {
        Some(t) => t.parse::<StrategyKind>()?,
        None => StrategyKind::Savings,
    };
    let name = config
        .get_string("strategy", "name")
        .unwrap_or_else(|| "Unnamed".to_string());

    let mut strategy = BacktestStrategy::new(name, kind, input);
    strategy.description = config
        .get_string("strategy", "description")
        .unwrap_or_default();
    strategy.start_date = config
        .get_string("strategy", "start_date")
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
    Ok(strategy)
}

pub fn max_duration_months(config: &dyn ConfigPort) -> Result<u32, FinboardError> {
    validate_limits_config(config)?;
    Ok(read_number(config, "limits", "max_duration_months")?
        .map(|v| v as u32)
        .unwrap_or(DEFAULT_MAX_DURATION_MONTHS))
}

pub fn alert_threshold(config: &dyn ConfigPort) -> Result<f64, FinboardError> {
    validate_budget_config(config)?;
    Ok(read_number(config, "budget", "alert_threshold")?.unwrap_or(DEFAULT_ALERT_THRESHOLD_PCT))
}

/// Report writer for `[report] format`, Markdown unless configured otherwise.
pub fn report_port(config: &dyn ConfigPort) -> Result<Box<dyn ReportPort>, FinboardError> {
    validate_report_config(config)?;
    let format = config
        .get_string("report", "format")
        .unwrap_or_else(|| "markdown".to_string())
        .to_lowercase();

    match format.as_str() {
        #[cfg(feature = "serde")]
        "json" => Ok(Box::new(
            crate::adapters::json_report_adapter::JsonReportAdapter::new(),
        )),
        #[cfg(not(feature = "serde"))]
        "json" => Err(FinboardError::ConfigInvalid {
            section: "report".to_string(),
            key: "format".to_string(),
            reason: "json reports require the serde feature".to_string(),
        }),
        _ => Ok(Box::new(MarkdownReportAdapter::new())),
    }
}

/// Output path from the command line, falling back to `[report] output`.
fn resolve_output(cli_output: Option<&Path>, config: &dyn ConfigPort) -> Option<String> {
    cli_output
        .map(|p| p.display().to_string())
        .or_else(|| config.get_string("report", "output"))
        .filter(|s| !s.trim().is_empty())
}

/// Progress of the target stored for `date`. Trades are expected to be
/// recorded against that single day.
pub fn target_progress(
    ledger: &dyn LedgerPort,
    fallback: Option<&DailyTargetGoals>,
    date: NaiveDate,
) -> Result<(DailyTargetProgress, Vec<TradeEvent>), FinboardError> {
    let (goals, actual_savings) = match ledger.fetch_target(date)? {
        Some(record) => (record.goals, record.actual_savings),
        None => match fallback {
            Some(goals) => {
                log::warn!("No target stored for {date}, using [target] from config");
                (*goals, 0.0)
            }
            None => {
                return Err(FinboardError::Data {
                    reason: format!("no target found for {date}"),
                })
            }
        },
    };

    let trades = ledger.fetch_trades(date, date)?;
    let progress = compute_progress(&goals, &trades)?.with_actual_savings(actual_savings)?;
    Ok((progress, trades))
}

fn run_progress(
    config_path: &Path,
    data_path: &Path,
    date: NaiveDate,
    output: Option<&Path>,
) -> Result<(), FinboardError> {
    let config = load_config(config_path)?;
    let fallback = if config.has_section("target") {
        Some(build_goals(&config)?)
    } else {
        None
    };
    let reporter = report_port(&config)?;

    let ledger = open_ledger(data_path);
    let (progress, trades) = target_progress(&ledger, fallback.as_ref(), date)?;
    log::info!("Computed progress for {date} from {} trades", trades.len());

    print!(
        "{}",
        markdown_report_adapter::render_progress(date, &progress, &trades)
    );

    if let Some(path) = resolve_output(output, &config) {
        reporter.write_progress(date, &progress, &trades, &path)?;
        log::info!("Report written to: {path}");
    }
    Ok(())
}

fn run_project(config_path: &Path, output: Option<&Path>) -> Result<(), FinboardError> {
    let config = load_config(config_path)?;
    let max_months = max_duration_months(&config)?;
    let reporter = report_port(&config)?;

    let mut strategy = build_strategy(&config)?;
    log::info!(
        "Projecting strategy: {} ({} months)",
        strategy.name,
        strategy.input.duration_months
    );
    let projection = strategy.run(max_months)?;

    print!(
        "{}",
        markdown_report_adapter::render_projection(&strategy, &projection)
    );
    println!(
        "Return on contributions: {:.2}%",
        projection.return_on_contributions_pct(strategy.input.initial_amount)
    );

    if let Some(path) = resolve_output(output, &config) {
        reporter.write_projection(&strategy, &projection, &path)?;
        log::info!("Report written to: {path}");
    }
    Ok(())
}

fn run_stats(
    data_path: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), FinboardError> {
    let ledger = open_ledger(data_path);
    let trades = ledger.fetch_trades(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))?;
    log::info!("Loaded {} trades", trades.len());

    let stats = TradeStats::compute(&trades)?;
    println!("Total Trades:   {}", stats.total_trades);
    println!("Wins / Losses:  {} / {}", stats.wins, stats.losses);
    println!("Win Rate:       {:.1}%", stats.win_rate_pct);
    println!("Gross Profit:   {:.2}", stats.gross_profit);
    println!("Gross Loss:     {:.2}", stats.gross_loss);
    println!("Net Profit:     {:.2}", stats.net_profit);
    println!("Average Win:    {:.2}", stats.avg_win);
    println!("Average Loss:   {:.2}", stats.avg_loss);
    println!("Largest Win:    {:.2}", stats.largest_win);
    println!("Largest Loss:   {:.2}", stats.largest_loss);
    println!("Profit Factor:  {:.2}", stats.profit_factor);
    Ok(())
}

/// Progress of every stored target in `[start, end]`. Trades dated on a day
/// without a target are skipped.
pub fn period_progress(
    ledger: &dyn LedgerPort,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyTargetProgress>, FinboardError> {
    let targets = ledger.fetch_targets(start, end)?;

    let mut trades_by_day: BTreeMap<NaiveDate, Vec<TradeEvent>> = BTreeMap::new();
    for trade in ledger.fetch_trades(start, end)? {
        if let Some(time) = trade.trade_time {
            trades_by_day.entry(time.date()).or_default().push(trade);
        }
    }

    let mut days = Vec::with_capacity(targets.len());
    for target in &targets {
        let trades = trades_by_day.remove(&target.date).unwrap_or_default();
        let progress = compute_progress(&target.goals, &trades)?;
        days.push(progress.with_actual_savings(target.actual_savings)?);
    }

    for (day, trades) in &trades_by_day {
        log::warn!("skipping {} trades on {day} (no target stored)", trades.len());
    }
    Ok(days)
}

fn run_summary(data_path: &Path, period: Period, anchor: NaiveDate) -> Result<(), FinboardError> {
    let (start, end) = period_bounds(period, anchor)?;
    log::info!("Summarising {period} {start} to {end}");

    let ledger = open_ledger(data_path);
    let days = period_progress(&ledger, start, end)?;
    let summary = PeriodSummary::compute(&days);

    println!("Period:            {start} to {end}");
    println!("Days with target:  {}", summary.total_days);
    println!("Days income met:   {}", summary.days_met_income);
    println!("Days within limit: {}", summary.days_within_expense);
    println!("Days savings met:  {}", summary.days_met_savings);
    println!("Days completed:    {}", summary.days_completed);
    println!(
        "Income:            {:.2} / {:.2}",
        summary.total_actual_income, summary.total_income_target
    );
    println!(
        "Loss:              {:.2} / {:.2}",
        summary.total_actual_expense, summary.total_expense_limit
    );
    println!(
        "Savings:           {:.2} / {:.2}",
        summary.total_actual_savings, summary.total_savings_target
    );
    println!("Net:               {:.2}", summary.net);
    println!(
        "Trades:            {} ({} wins / {} losses, {:.1}%)",
        summary.total_trades, summary.total_wins, summary.total_losses, summary.win_rate_pct
    );
    Ok(())
}

fn run_budgets(
    config_path: Option<&Path>,
    data_path: &Path,
    threshold: Option<f64>,
) -> Result<(), FinboardError> {
    let threshold = match (threshold, config_path) {
        (Some(t), _) => t,
        (None, Some(path)) => alert_threshold(&load_config(path)?)?,
        (None, None) => DEFAULT_ALERT_THRESHOLD_PCT,
    };

    let ledger = open_ledger(data_path);
    let budgets = ledger.fetch_budgets()?;
    let transactions = ledger.fetch_transactions(NaiveDate::MIN, NaiveDate::MAX)?;
    log::info!(
        "Loaded {} budgets and {} transactions",
        budgets.len(),
        transactions.len()
    );

    let usages = budgets
        .iter()
        .map(|b| BudgetUsage::compute(b, &transactions))
        .collect::<Result<Vec<_>, _>>()?;

    println!("| Category | Period | Amount | Spent | Remaining | Used | Status |");
    println!("|---|---|---:|---:|---:|---:|---|");
    for usage in &usages {
        println!(
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.1}% | {} |",
            usage.budget.category,
            usage.budget.period,
            usage.budget.amount,
            usage.spent,
            usage.remaining,
            usage.percentage,
            usage.status
        );
    }

    let summary = BudgetSummary::compute(&usages);
    println!();
    println!("Allocated: {:.2}", summary.total_allocated);
    println!("Spent:     {:.2}", summary.total_spent);
    println!("Remaining: {:.2}", summary.total_remaining);
    println!("Over budget: {}", summary.over_budget_count);

    let alerts = budget_alerts(&usages, threshold);
    if !alerts.is_empty() {
        println!();
        println!("Alerts (>= {threshold}%):");
        for usage in alerts {
            log::warn!(
                "budget {} at {:.1}%",
                usage.budget.category,
                usage.percentage
            );
            println!("  {}: {:.1}% ({})", usage.budget.category, usage.percentage, usage.status);
        }
    }
    Ok(())
}

fn run_goals(data_path: &Path, today: NaiveDate) -> Result<(), FinboardError> {
    let ledger = open_ledger(data_path);
    let goals = ledger.fetch_goals()?;
    log::info!("Loaded {} goals", goals.len());

    println!("| Goal | Priority | Target | Current | Progress | Days left | Per day |");
    println!("|---|---|---:|---:|---:|---:|---:|");
    for goal in &goals {
        let progress = GoalProgress::compute(goal, today)?;
        println!(
            "| {} | {} | {:.2} | {:.2} | {:.1}% | {} | {:.2} |",
            progress.title,
            progress.priority,
            progress.target_amount,
            progress.current_amount,
            progress.progress_pct,
            progress.days_remaining,
            progress.required_per_day
        );
    }

    let summary = GoalsSummary::compute(&goals)?;
    println!();
    println!(
        "Goals: {} ({} active, {} completed)",
        summary.total_goals, summary.active_goals, summary.completed_goals
    );
    println!(
        "Overall: {:.2} / {:.2} ({:.1}%)",
        summary.total_current, summary.total_target, summary.overall_progress_pct
    );
    Ok(())
}

fn run_transactions(
    data_path: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), FinboardError> {
    let ledger = open_ledger(data_path);
    let transactions =
        ledger.fetch_transactions(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))?;
    log::info!("Loaded {} transactions", transactions.len());

    let summary = TransactionSummary::compute(&transactions)?;
    println!("Income:  {:.2}", summary.total_income);
    println!("Expense: {:.2}", summary.total_expense);
    println!("Net:     {:.2}", summary.net_balance);

    for kind in [TransactionKind::Expense, TransactionKind::Income] {
        let breakdown = category_breakdown(&transactions, kind)?;
        if breakdown.is_empty() {
            continue;
        }
        println!();
        println!("{kind} by category:");
        for entry in breakdown {
            println!(
                "  {:<20} {:>14.2} {:>6.1}% ({})",
                entry.category, entry.total, entry.share_pct, entry.count
            );
        }
    }

    let trend = monthly_trend(&transactions, None)?;
    if !trend.is_empty() {
        println!();
        println!("| Month | Income | Expense | Net |");
        println!("|---|---:|---:|---:|");
        for month in trend {
            println!(
                "| {}-{:02} | {:.2} | {:.2} | {:.2} |",
                month.year, month.month, month.income, month.expense, month.net
            );
        }
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), FinboardError> {
    let config = load_config(config_path)?;

    if config.has_section("target") {
        validate_target_config(&config)?;
        println!("[target]   ok");
    }
    if config.has_section("strategy") {
        let strategy = build_strategy(&config)?;
        strategy.input.validate(max_duration_months(&config)?)?;
        println!("[strategy] ok ({})", strategy.name);
    }
    validate_limits_config(&config)?;
    validate_budget_config(&config)?;
    validate_report_config(&config)?;

    println!("Config validated successfully");
    Ok(())
}
