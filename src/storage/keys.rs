//! Key names of the persisted entries.

pub const USER_NAME: &str = "SavedUserName";
pub const IC_NUMBER: &str = "SavedICNumber";
pub const PHONE_NUMBER: &str = "SavedPhoneNumber";
pub const BUSINESS_NAME: &str = "SavedBusinessName";
pub const EMAIL: &str = "SavedEmail";
pub const PROFILE_VERSION: &str = "SavedProfileVersion";
pub const TRANSACTIONS: &str = "SavedTransactions";
pub const WITHDRAWALS: &str = "SavedWithdrawals";
