use std::sync::{mpsc::Receiver, Arc};

use crate::{
    config::Config,
    core::{
        clock::{Clock, SystemClock},
        events::{ChangeAction, ChangeBroadcaster, ChangedEntity, StateChange},
        sample_data,
        services::{DashboardSummary, SummaryService, WithdrawalService, WEEK_DAYS},
    },
    domain::{Profile, SessionState, Transaction, Withdrawal},
    errors::Result,
    storage::{records, JsonKeyValueStore, KeyValueStore},
};

/// Owns the merchant profile, session flag, payment ledger and withdrawal
/// log, and keeps them in sync with a [`KeyValueStore`].
///
/// Mutators run one at a time through `&mut self`. Persistence failures are
/// logged and never returned; the in-memory state stays authoritative for
/// the rest of the session.
pub struct AccountManager {
    profile: Profile,
    session: SessionState,
    transactions: Vec<Transaction>,
    withdrawals: Vec<Withdrawal>,
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    changes: ChangeBroadcaster,
}

impl AccountManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Loads profile, ledger and withdrawals from `store`, defaulting
    /// whatever is missing or undecodable.
    pub fn with_clock(store: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let profile = records::load_profile(store.as_ref());
        let transactions = records::load_transactions(store.as_ref());
        let withdrawals = records::load_withdrawals(store.as_ref());
        tracing::debug!(
            transactions = transactions.len(),
            withdrawals = withdrawals.len(),
            "account manager loaded"
        );
        Self {
            profile,
            session: SessionState::SignedOut,
            transactions,
            withdrawals,
            store,
            clock,
            changes: ChangeBroadcaster::default(),
        }
    }

    /// Opens the JSON store in the configured data directory and seeds the
    /// demo ledger when the configuration asks for it.
    pub fn open(config: &Config) -> Result<Self> {
        let base = config.resolve_data_dir();
        let store = JsonKeyValueStore::in_dir(&base)?;
        tracing::info!(path = %store.path().display(), "opening merchant store");
        let mut manager = Self::new(Box::new(store));
        if config.seed_sample_data {
            manager.seed_sample_data_if_empty();
        }
        Ok(manager)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    /// Ledger entries, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Withdrawal log in the order the withdrawals were processed.
    pub fn withdrawals(&self) -> &[Withdrawal] {
        &self.withdrawals
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.changes.subscribe()
    }

    /// Re-reads the profile from storage and makes it current.
    pub fn load_profile(&mut self) -> Profile {
        self.profile = records::load_profile(self.store.as_ref());
        self.notify(ChangedEntity::Profile, ChangeAction::Reloaded);
        self.profile.clone()
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        let next = self.profile.with_name(name);
        self.commit_profile(next);
    }

    pub fn update_phone(&mut self, phone_number: impl Into<String>) {
        let next = self.profile.with_phone_number(phone_number);
        self.commit_profile(next);
    }

    pub fn update_business_name(&mut self, business_name: impl Into<String>) {
        let next = self.profile.with_business_name(business_name);
        self.commit_profile(next);
    }

    pub fn update_email(&mut self, email: impl Into<String>) {
        let next = self.profile.with_email(email);
        self.commit_profile(next);
    }

    /// Applies the name and IC number read from an identity document.
    pub fn update_from_identity(&mut self, name: impl Into<String>, ic_number: impl Into<String>) {
        let next = self.profile.with_identity(name, ic_number);
        self.commit_profile(next);
    }

    pub fn sign_in(&mut self) {
        self.session = self.session.sign_in();
        self.notify(ChangedEntity::Session, ChangeAction::Updated);
    }

    pub fn sign_out(&mut self) {
        self.session = self.session.sign_out();
        self.notify(ChangedEntity::Session, ChangeAction::Updated);
    }

    /// Records a completed payment at the head of the ledger. The amount is
    /// taken as given; callers validate it beforehand.
    pub fn add_transaction(&mut self, customer_name: impl Into<String>, amount: f64) -> Transaction {
        let txn = Transaction::completed(customer_name, amount, self.clock.now());
        tracing::debug!(id = %txn.id, amount, "recording transaction");
        self.transactions.insert(0, txn.clone());
        self.persist_transactions();
        self.notify(ChangedEntity::Transactions, ChangeAction::Created);
        txn
    }

    /// Settles `amount` out of the available balance.
    ///
    /// Rejects non-positive amounts and amounts above the available balance;
    /// a rejected withdrawal leaves every balance untouched. The recorded
    /// amount is rounded to the cent.
    pub fn process_withdrawal(&mut self, amount: f64) -> Result<Withdrawal> {
        let amount = WithdrawalService::authorize(amount, self.available_balance())?;
        let withdrawal = Withdrawal::new(amount, self.clock.now());
        tracing::debug!(id = %withdrawal.id, amount, "processing withdrawal");
        self.withdrawals.push(withdrawal.clone());
        if let Err(err) = records::save_withdrawals(self.store.as_ref(), &self.withdrawals) {
            tracing::warn!(error = %err, "failed to persist withdrawals");
        }
        self.notify(ChangedEntity::Withdrawals, ChangeAction::Created);
        Ok(withdrawal)
    }

    /// Inserts the demo ledger when no transactions exist. Returns whether
    /// anything was inserted.
    pub fn seed_sample_data_if_empty(&mut self) -> bool {
        if !self.transactions.is_empty() {
            return false;
        }
        self.transactions = sample_data::sample_transactions(self.clock.now());
        tracing::info!(count = self.transactions.len(), "seeded sample transactions");
        self.persist_transactions();
        self.notify(ChangedEntity::Transactions, ChangeAction::Seeded);
        true
    }

    pub fn today_revenue(&self) -> f64 {
        SummaryService::today_revenue(&self.transactions, self.clock.now())
    }

    pub fn today_transaction_count(&self) -> usize {
        SummaryService::today_count(&self.transactions, self.clock.now())
    }

    pub fn today_active_customers(&self) -> usize {
        SummaryService::active_customers_on(&self.transactions, self.clock.today())
    }

    pub fn weekly_revenue(&self) -> [f64; WEEK_DAYS] {
        SummaryService::weekly_revenue(&self.transactions, self.clock.now())
    }

    pub fn total_balance(&self) -> f64 {
        SummaryService::total_balance(&self.transactions)
    }

    pub fn available_balance(&self) -> f64 {
        SummaryService::available_balance(&self.transactions, &self.withdrawals)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        SummaryService::dashboard(&self.transactions, &self.withdrawals, self.clock.now())
    }

    fn commit_profile(&mut self, profile: Profile) {
        self.profile = profile;
        if let Err(err) = records::save_profile(self.store.as_ref(), &self.profile) {
            tracing::warn!(error = %err, "failed to persist profile");
        }
        self.notify(ChangedEntity::Profile, ChangeAction::Updated);
    }

    fn persist_transactions(&self) {
        if let Err(err) = records::save_transactions(self.store.as_ref(), &self.transactions) {
            tracing::warn!(error = %err, "failed to persist transactions");
        }
    }

    fn notify(&mut self, entity: ChangedEntity, action: ChangeAction) {
        self.changes.publish(StateChange::new(entity, action));
    }
}
