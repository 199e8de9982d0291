//! Payment transactions recorded by the merchant terminal.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amounted, Displayable};

/// A completed (or attempted) face payment. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_name: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Builds a completed transaction with a fresh identifier.
    pub fn completed(customer_name: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_name: customer_name.into(),
            amount,
            date,
            status: TransactionStatus::Completed,
        }
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self, money: fn(f64) -> String) -> String {
        format!(
            "{} {} {} [{}]",
            self.date.format("%Y-%m-%d %H:%M"),
            self.customer_name,
            money(self.amount),
            self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Enumerates the lifecycle state of a transaction.
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}
