use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{sum_amounts, Transaction, Withdrawal};

/// Number of days in the dashboard's revenue series.
pub const WEEK_DAYS: usize = 7;

/// Point-in-time snapshot of every dashboard figure.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub today_revenue: f64,
    pub today_transactions: usize,
    pub active_customers: usize,
    pub total_balance: f64,
    pub available_balance: f64,
    /// Oldest first; the last element is today.
    pub weekly_revenue: [f64; WEEK_DAYS],
}

/// Pure derivations over a transaction slice. Nothing is cached; callers pass
/// the current collections and timestamp on every read.
pub struct SummaryService;

impl SummaryService {
    pub fn revenue_on(transactions: &[Transaction], date: NaiveDate) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.date.date_naive() == date)
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn count_on(transactions: &[Transaction], date: NaiveDate) -> usize {
        transactions
            .iter()
            .filter(|txn| txn.date.date_naive() == date)
            .count()
    }

    pub fn active_customers_on(transactions: &[Transaction], date: NaiveDate) -> usize {
        transactions
            .iter()
            .filter(|txn| txn.date.date_naive() == date)
            .map(|txn| txn.customer_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn today_revenue(transactions: &[Transaction], now: DateTime<Utc>) -> f64 {
        Self::revenue_on(transactions, now.date_naive())
    }

    pub fn today_count(transactions: &[Transaction], now: DateTime<Utc>) -> usize {
        Self::count_on(transactions, now.date_naive())
    }

    pub fn total_balance(transactions: &[Transaction]) -> f64 {
        sum_amounts(transactions)
    }

    pub fn available_balance(transactions: &[Transaction], withdrawals: &[Withdrawal]) -> f64 {
        sum_amounts(transactions) - sum_amounts(withdrawals)
    }

    /// Daily revenue for the seven days ending today; index 0 is six days ago.
    pub fn weekly_revenue(transactions: &[Transaction], now: DateTime<Utc>) -> [f64; WEEK_DAYS] {
        let today = now.date_naive();
        let mut series = [0.0; WEEK_DAYS];
        for txn in transactions {
            let days_ago = (today - txn.date.date_naive()).num_days();
            if (0..WEEK_DAYS as i64).contains(&days_ago) {
                series[WEEK_DAYS - 1 - days_ago as usize] += txn.amount;
            }
        }
        series
    }

    pub fn dashboard(
        transactions: &[Transaction],
        withdrawals: &[Withdrawal],
        now: DateTime<Utc>,
    ) -> DashboardSummary {
        let today = now.date_naive();
        DashboardSummary {
            today_revenue: Self::revenue_on(transactions, today),
            today_transactions: Self::count_on(transactions, today),
            active_customers: Self::active_customers_on(transactions, today),
            total_balance: Self::total_balance(transactions),
            available_balance: Self::available_balance(transactions, withdrawals),
            weekly_revenue: Self::weekly_revenue(transactions, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, day, hour, 0, 0).unwrap()
    }

    fn txn(name: &str, amount: f64, date: DateTime<Utc>) -> Transaction {
        Transaction::completed(name, amount, date)
    }

    #[test]
    fn today_figures_exclude_other_days() {
        let now = at(10, 15);
        let ledger = vec![
            txn("A", 10.0, at(10, 9)),
            txn("B", 5.5, at(10, 0)),
            txn("A", 2.0, at(10, 14)),
            txn("C", 100.0, at(9, 23)),
        ];
        assert_eq!(SummaryService::today_revenue(&ledger, now), 17.5);
        assert_eq!(SummaryService::today_count(&ledger, now), 3);
        assert_eq!(
            SummaryService::active_customers_on(&ledger, now.date_naive()),
            2
        );
        assert_eq!(SummaryService::total_balance(&ledger), 117.5);
    }

    #[test]
    fn weekly_series_is_oldest_first() {
        let now = at(10, 12);
        let ledger = vec![
            txn("today", 1.0, now),
            txn("yesterday", 2.0, now - Duration::days(1)),
            txn("six days", 6.0, now - Duration::days(6)),
            txn("seven days", 7.0, now - Duration::days(7)),
            txn("future", 9.0, now + Duration::days(1)),
        ];
        let series = SummaryService::weekly_revenue(&ledger, now);
        assert_eq!(series, [6.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn available_balance_subtracts_withdrawals() {
        let now = at(10, 12);
        let ledger = vec![txn("A", 50.0, now), txn("B", 25.0, now)];
        let withdrawals = vec![Withdrawal::new(20.0, now), Withdrawal::new(5.0, now)];
        assert_eq!(SummaryService::available_balance(&ledger, &withdrawals), 50.0);
    }

    #[test]
    fn dashboard_of_empty_ledger_is_zeroed() {
        let summary = SummaryService::dashboard(&[], &[], at(10, 12));
        assert_eq!(summary.today_revenue, 0.0);
        assert_eq!(summary.today_transactions, 0);
        assert_eq!(summary.active_customers, 0);
        assert_eq!(summary.weekly_revenue, [0.0; WEEK_DAYS]);
    }
}
