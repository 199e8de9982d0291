//! Typed records layered over a [`KeyValueStore`].
//!
//! Loading never fails: missing keys fall back to defaults and undecodable
//! collections load as empty. Saving returns errors so callers can decide
//! whether to surface them.

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    domain::{Profile, Transaction, Withdrawal},
    errors::Result,
};

use super::{keys, KeyValueStore};

/// Version written alongside the profile fields.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Reads the profile record, applying the documented default for each
/// missing field.
pub fn load_profile(store: &dyn KeyValueStore) -> Profile {
    let defaults = Profile::default();
    if let Some(version) = read_key(store, keys::PROFILE_VERSION) {
        match version.parse::<u32>() {
            Ok(found) if found > PROFILE_SCHEMA_VERSION => tracing::warn!(
                found,
                supported = PROFILE_SCHEMA_VERSION,
                "profile record is newer than supported; reading known fields"
            ),
            Ok(_) => {}
            Err(_) => tracing::warn!(%version, "ignoring unparsable profile version"),
        }
    }
    Profile {
        name: read_key(store, keys::USER_NAME).unwrap_or(defaults.name),
        ic_number: read_key(store, keys::IC_NUMBER).unwrap_or(defaults.ic_number),
        phone_number: read_key(store, keys::PHONE_NUMBER).unwrap_or(defaults.phone_number),
        business_name: read_key(store, keys::BUSINESS_NAME).unwrap_or(defaults.business_name),
        email: read_key(store, keys::EMAIL).unwrap_or(defaults.email),
    }
}

/// Writes all profile fields and the schema version in one store write.
pub fn save_profile(store: &dyn KeyValueStore, profile: &Profile) -> Result<()> {
    store.set_many(&[
        (keys::USER_NAME, profile.name.clone()),
        (keys::IC_NUMBER, profile.ic_number.clone()),
        (keys::PHONE_NUMBER, profile.phone_number.clone()),
        (keys::BUSINESS_NAME, profile.business_name.clone()),
        (keys::EMAIL, profile.email.clone()),
        (keys::PROFILE_VERSION, PROFILE_SCHEMA_VERSION.to_string()),
    ])
}

pub fn load_transactions(store: &dyn KeyValueStore) -> Vec<Transaction> {
    load_collection(store, keys::TRANSACTIONS)
}

pub fn save_transactions(store: &dyn KeyValueStore, transactions: &[Transaction]) -> Result<()> {
    save_collection(store, keys::TRANSACTIONS, transactions)
}

pub fn load_withdrawals(store: &dyn KeyValueStore) -> Vec<Withdrawal> {
    load_collection(store, keys::WITHDRAWALS)
}

pub fn save_withdrawals(store: &dyn KeyValueStore, withdrawals: &[Withdrawal]) -> Result<()> {
    save_collection(store, keys::WITHDRAWALS, withdrawals)
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "storage read failed; using default");
            None
        }
    }
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let Some(raw) = read_key(store, key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding undecodable collection");
            Vec::new()
        }
    }
}

fn save_collection<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}
