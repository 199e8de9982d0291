//! Demo ledger used to make a first launch look populated.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Transaction;

/// Customer, amount and minutes before "now", most recent first.
pub const SAMPLE_TRANSACTIONS: [(&str, f64, i64); 4] = [
    ("John Smith", 45.99, 15),
    ("Sarah Johnson", 128.50, 90),
    ("Mike Chen", 89.00, 60 * 24),
    ("Emma Wilson", 234.75, 60 * 48),
];

pub fn sample_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    SAMPLE_TRANSACTIONS
        .iter()
        .map(|(name, amount, minutes_ago)| {
            Transaction::completed(*name, *amount, now - Duration::minutes(*minutes_ago))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_ordered_most_recent_first() {
        let samples = sample_transactions(Utc::now());
        assert_eq!(samples.len(), 4);
        assert!(samples.windows(2).all(|pair| pair[0].date > pair[1].date));
    }
}
