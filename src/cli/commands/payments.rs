use chrono::Duration;

use crate::cli::{
    commands::{single_arg, usage_error},
    core::{CommandError, CommandResult},
    output::{self, money},
    payment::{PaymentError, PaymentFlow},
    registry::CommandEntry,
    shell_context::ShellContext,
    validation::parse_amount,
};
use crate::core::services::WEEK_DAYS;
use crate::domain::Displayable;

const MAX_SCAN_ATTEMPTS: usize = 3;
const DEFAULT_HISTORY_LIMIT: usize = 10;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "charge",
            "Take a face payment from a customer",
            "charge <amount>",
            cmd_charge,
        )
        .signed_in(),
        CommandEntry::new(
            "history",
            "List recent transactions, newest first",
            "history [limit]",
            cmd_history,
        ),
        CommandEntry::new("summary", "Show the dashboard figures", "summary", cmd_summary),
        CommandEntry::new(
            "withdraw",
            "Withdraw from the available balance",
            "withdraw <amount>",
            cmd_withdraw,
        )
        .signed_in(),
        CommandEntry::new(
            "seed",
            "Load demo transactions into an empty ledger",
            "seed",
            cmd_seed,
        ),
    ]
}

fn cmd_charge(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = single_arg(args, "charge <amount>")?;

    let mut flow = PaymentFlow::new();
    let amount = flow.enter_amount(raw)?;
    output::info(format!("Scanning customer for {}...", money(amount)));
    let customer = scan_customer(context, &mut flow)?;

    if !context.confirm(&format!("Charge {} to {}?", money(amount), customer))? {
        flow.cancel();
        output::warning("Payment cancelled.");
        return Ok(());
    }
    flow.confirm()?;
    let txn = flow.complete(&mut context.manager)?;
    output::success(format!(
        "Received {} from {}.",
        money(txn.amount),
        txn.customer_name
    ));
    Ok(())
}

fn scan_customer(context: &mut ShellContext, flow: &mut PaymentFlow) -> Result<String, CommandError> {
    for attempt in 1..=MAX_SCAN_ATTEMPTS {
        match flow.scan(context.scanner.as_mut()) {
            Ok(customer) => return Ok(customer),
            Err(PaymentError::NotRecognized) => output::warning(format!(
                "Face not recognized (attempt {} of {}).",
                attempt, MAX_SCAN_ATTEMPTS
            )),
            Err(err) => return Err(err.into()),
        }
    }
    flow.cancel();
    Err(PaymentError::NotRecognized.into())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args {
        [] => DEFAULT_HISTORY_LIMIT,
        [raw] => raw
            .parse::<usize>()
            .map_err(|_| usage_error("history [limit]"))?,
        _ => return Err(usage_error("history [limit]")),
    };

    let transactions = context.manager.transactions();
    if transactions.is_empty() {
        output::info("No transactions yet.");
    } else {
        output::section("Recent transactions");
        for txn in transactions.iter().take(limit) {
            println!("  {}", txn.display_label(money));
        }
        if transactions.len() > limit {
            output::info(format!("{} more not shown.", transactions.len() - limit));
        }
    }

    let withdrawals = context.manager.withdrawals();
    if !withdrawals.is_empty() {
        output::section("Withdrawals");
        for withdrawal in withdrawals.iter().rev().take(limit) {
            println!("  {}", withdrawal.display_label(money));
        }
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.manager.dashboard();
    output::section("Dashboard");
    output::two_column(&[
        ("Today's revenue", money(summary.today_revenue)),
        ("Transactions", summary.today_transactions.to_string()),
        ("Active customers", summary.active_customers.to_string()),
        ("Total balance", money(summary.total_balance)),
        ("Available balance", money(summary.available_balance)),
    ]);

    output::section("Last 7 days");
    let today = context.manager.clock().today();
    let rows: Vec<(String, String)> = summary
        .weekly_revenue
        .iter()
        .enumerate()
        .map(|(idx, revenue)| {
            let day = today - Duration::days((WEEK_DAYS - 1 - idx) as i64);
            (day.format("%a %d %b").to_string(), money(*revenue))
        })
        .collect();
    let rows: Vec<(&str, String)> = rows
        .iter()
        .map(|(day, revenue)| (day.as_str(), revenue.clone()))
        .collect();
    output::two_column(&rows);
    Ok(())
}

fn cmd_withdraw(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = parse_amount(single_arg(args, "withdraw <amount>")?)?;
    let available = context.manager.available_balance();
    if !context.confirm(&format!(
        "Withdraw {} of {} available?",
        money(amount),
        money(available)
    ))? {
        output::warning("Withdrawal cancelled.");
        return Ok(());
    }
    let withdrawal = context.manager.process_withdrawal(amount)?;
    output::success(format!(
        "Withdrew {}. Available balance is now {}.",
        money(withdrawal.amount),
        money(context.manager.available_balance())
    ));
    Ok(())
}

fn cmd_seed(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.manager.seed_sample_data_if_empty() {
        output::success(format!(
            "Loaded {} demo transactions.",
            context.manager.transactions().len()
        ));
    } else {
        output::info("Ledger already has transactions; nothing seeded.");
    }
    Ok(())
}
