//! # Planning Calculators
//!
//! Pure functions behind the two calculators on the page:
//!
//! - [`savings`] - monthly contribution needed to reach a goal by a date
//! - [`returns`] - projected value of an investment under compound interest
//!
//! Neither function performs I/O. Recording a result on-chain is the job of the
//! memo recorder in `lib-evm`, which only ever sees results these functions
//! have already returned.

pub mod returns;
pub mod savings;

pub use returns::{compute_return, project_value, resolve_rate, FIXED_FUND_RATE_PERCENT};
pub use savings::{compute_monthly_savings, AVERAGE_DAYS_PER_MONTH};
