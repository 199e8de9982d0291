//! Domain models for the merchant profile, session, ledger and withdrawals.
//! No I/O here; persistence lives in `storage`.

pub mod common;
pub mod profile;
pub mod session;
pub mod transaction;
pub mod withdrawal;

pub use common::*;
pub use profile::*;
pub use session::*;
pub use transaction::*;
pub use withdrawal::*;
