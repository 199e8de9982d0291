use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amounted, Displayable};

/// A settlement of available balance out of the app. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Withdrawal {
    pub fn new(amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            date,
        }
    }
}

impl Amounted for Withdrawal {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Withdrawal {
    fn display_label(&self, money: fn(f64) -> String) -> String {
        format!("{} withdrawal {}", self.date.format("%Y-%m-%d %H:%M"), money(self.amount))
    }
}
