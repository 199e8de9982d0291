//! Face-payment flow: amount entry, scan, confirm, process, complete.
//!
//! Recognition is simulated. A [`FaceScanner`] returns a customer name and the
//! flow hands the recognized name and confirmed amount to
//! [`AccountManager::add_transaction`] once processing finishes.

use std::fmt;

use thiserror::Error;

use crate::{
    cli::validation::{parse_amount, ValidationError},
    core::AccountManager,
    domain::Transaction,
};

/// Customers the demo scanner cycles through.
pub const DEMO_CUSTOMERS: [&str; 4] = ["John Smith", "Sarah Johnson", "Mike Chen", "Emma Wilson"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Recognized(String),
    NotRecognized,
}

/// Source of (simulated) face recognition results.
pub trait FaceScanner {
    fn scan(&mut self) -> ScanOutcome;
}

/// Always recognizes the same customer.
#[derive(Debug, Clone)]
pub struct FixedScanner {
    name: String,
}

impl FixedScanner {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FaceScanner for FixedScanner {
    fn scan(&mut self) -> ScanOutcome {
        ScanOutcome::Recognized(self.name.clone())
    }
}

/// Recognizes customers from a roster in round-robin order. An empty roster
/// never recognizes anyone.
#[derive(Debug, Clone)]
pub struct RosterScanner {
    roster: Vec<String>,
    next: usize,
}

impl RosterScanner {
    pub fn new<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roster: roster.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_CUSTOMERS)
    }
}

impl FaceScanner for RosterScanner {
    fn scan(&mut self) -> ScanOutcome {
        if self.roster.is_empty() {
            return ScanOutcome::NotRecognized;
        }
        let name = self.roster[self.next % self.roster.len()].clone();
        self.next = self.next.wrapping_add(1);
        ScanOutcome::Recognized(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentStage {
    AmountEntry,
    Scanning { amount: f64 },
    Confirming { amount: f64, customer: String },
    Processing { amount: f64, customer: String },
    Complete(Transaction),
    Cancelled,
}

impl PaymentStage {
    fn name(&self) -> &'static str {
        match self {
            PaymentStage::AmountEntry => "amount entry",
            PaymentStage::Scanning { .. } => "scanning",
            PaymentStage::Confirming { .. } => "confirming",
            PaymentStage::Processing { .. } => "processing",
            PaymentStage::Complete(_) => "complete",
            PaymentStage::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    #[error(transparent)]
    Amount(#[from] ValidationError),
    #[error("face not recognized")]
    NotRecognized,
    #[error("cannot {action} while {stage}")]
    OutOfOrder { action: &'static str, stage: String },
}

/// One payment attempt. Each step only succeeds from its own stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFlow {
    stage: PaymentStage,
}

impl Default for PaymentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self {
            stage: PaymentStage::AmountEntry,
        }
    }

    pub fn stage(&self) -> &PaymentStage {
        &self.stage
    }

    pub fn enter_amount(&mut self, raw: &str) -> Result<f64, PaymentError> {
        self.expect_stage("enter an amount", |stage| {
            matches!(stage, PaymentStage::AmountEntry)
        })?;
        let amount = parse_amount(raw)?;
        self.stage = PaymentStage::Scanning { amount };
        Ok(amount)
    }

    /// Runs one scan. A miss leaves the flow in `Scanning` so the caller
    /// may retry or cancel.
    pub fn scan(&mut self, scanner: &mut dyn FaceScanner) -> Result<String, PaymentError> {
        let PaymentStage::Scanning { amount } = self.stage else {
            return Err(self.out_of_order("scan"));
        };
        match scanner.scan() {
            ScanOutcome::Recognized(customer) => {
                self.stage = PaymentStage::Confirming {
                    amount,
                    customer: customer.clone(),
                };
                Ok(customer)
            }
            ScanOutcome::NotRecognized => Err(PaymentError::NotRecognized),
        }
    }

    pub fn confirm(&mut self) -> Result<(), PaymentError> {
        match &self.stage {
            PaymentStage::Confirming { amount, customer } => {
                self.stage = PaymentStage::Processing {
                    amount: *amount,
                    customer: customer.clone(),
                };
                Ok(())
            }
            _ => Err(self.out_of_order("confirm")),
        }
    }

    /// Records the payment with the manager and finishes the flow.
    pub fn complete(&mut self, manager: &mut AccountManager) -> Result<Transaction, PaymentError> {
        let PaymentStage::Processing { amount, customer } = &self.stage else {
            return Err(self.out_of_order("complete"));
        };
        let txn = manager.add_transaction(customer.clone(), *amount);
        self.stage = PaymentStage::Complete(txn.clone());
        Ok(txn)
    }

    /// Abandons the attempt. Completed payments stay completed.
    pub fn cancel(&mut self) {
        if !matches!(self.stage, PaymentStage::Complete(_)) {
            self.stage = PaymentStage::Cancelled;
        }
    }

    fn expect_stage<F>(&self, action: &'static str, allowed: F) -> Result<(), PaymentError>
    where
        F: Fn(&PaymentStage) -> bool,
    {
        if allowed(&self.stage) {
            Ok(())
        } else {
            Err(self.out_of_order(action))
        }
    }

    fn out_of_order(&self, action: &'static str) -> PaymentError {
        PaymentError::OutOfOrder {
            action,
            stage: self.stage.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct MissThenHit {
        misses: usize,
    }

    impl FaceScanner for MissThenHit {
        fn scan(&mut self) -> ScanOutcome {
            if self.misses > 0 {
                self.misses -= 1;
                ScanOutcome::NotRecognized
            } else {
                ScanOutcome::Recognized("Mike Chen".into())
            }
        }
    }

    #[test]
    fn happy_path_records_transaction() {
        let mut manager = AccountManager::new(Box::new(MemoryStore::new()));
        let mut scanner = FixedScanner::new("Sarah Johnson");
        let mut flow = PaymentFlow::new();

        assert_eq!(flow.enter_amount("128.50"), Ok(128.5));
        assert_eq!(flow.scan(&mut scanner), Ok("Sarah Johnson".to_string()));
        flow.confirm().unwrap();
        let txn = flow.complete(&mut manager).unwrap();

        assert_eq!(txn.customer_name, "Sarah Johnson");
        assert_eq!(txn.amount, 128.5);
        assert_eq!(manager.transactions()[0], txn);
        assert!(matches!(flow.stage(), PaymentStage::Complete(_)));
    }

    #[test]
    fn missed_scan_can_be_retried() {
        let mut flow = PaymentFlow::new();
        let mut scanner = MissThenHit { misses: 1 };
        flow.enter_amount("5").unwrap();
        assert_eq!(flow.scan(&mut scanner), Err(PaymentError::NotRecognized));
        assert_eq!(flow.stage(), &PaymentStage::Scanning { amount: 5.0 });
        assert_eq!(flow.scan(&mut scanner), Ok("Mike Chen".to_string()));
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        let mut manager = AccountManager::new(Box::new(MemoryStore::new()));
        let mut flow = PaymentFlow::new();
        assert!(matches!(
            flow.confirm(),
            Err(PaymentError::OutOfOrder { action: "confirm", .. })
        ));
        assert!(flow.complete(&mut manager).is_err());
        assert!(manager.transactions().is_empty());
    }

    #[test]
    fn invalid_amount_keeps_amount_entry() {
        let mut flow = PaymentFlow::new();
        assert!(matches!(
            flow.enter_amount("0"),
            Err(PaymentError::Amount(ValidationError::NonPositiveAmount))
        ));
        assert_eq!(flow.stage(), &PaymentStage::AmountEntry);
    }

    #[test]
    fn cancel_before_completion() {
        let mut flow = PaymentFlow::new();
        flow.enter_amount("10").unwrap();
        flow.cancel();
        assert_eq!(flow.stage(), &PaymentStage::Cancelled);
        assert!(flow.scan(&mut RosterScanner::demo()).is_err());
    }

    #[test]
    fn roster_scanner_cycles() {
        let mut scanner = RosterScanner::new(["A", "B"]);
        let names: Vec<_> = (0..3).map(|_| scanner.scan()).collect();
        assert_eq!(
            names,
            vec![
                ScanOutcome::Recognized("A".into()),
                ScanOutcome::Recognized("B".into()),
                ScanOutcome::Recognized("A".into()),
            ]
        );
        assert_eq!(RosterScanner::new(Vec::<String>::new()).scan(), ScanOutcome::NotRecognized);
    }
}
