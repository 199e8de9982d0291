pub mod summary_service;
pub mod withdrawal_service;

pub use summary_service::{DashboardSummary, SummaryService, WEEK_DAYS};
pub use withdrawal_service::WithdrawalService;
