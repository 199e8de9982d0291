#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use chrono::{TimeZone, Utc};
use merchant_core::{
    core::{AccountManager, FixedClock},
    storage::JsonKeyValueStore,
};

/// Friday 2025-08-01 12:00 UTC.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
    ))
}

/// Opens a manager on `store.json` inside `dir`, as a fresh app launch would.
pub fn launch(dir: &Path, clock: &Arc<FixedClock>) -> AccountManager {
    let store = JsonKeyValueStore::in_dir(dir).expect("open json store");
    AccountManager::with_clock(Box::new(store), clock.clone())
}
