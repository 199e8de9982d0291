pub mod account_manager;
pub mod clock;
pub mod events;
pub mod sample_data;
pub mod services;

pub use account_manager::AccountManager;
pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{ChangeAction, ChangedEntity, StateChange};
