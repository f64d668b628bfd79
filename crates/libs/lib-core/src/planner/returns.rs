//! Return estimator: compound-interest projection per investment type.
//!
//! Equity and mutual funds are quoted at a fixed 13% nominal annual rate; stocks
//! and gold use the rate the user enters. Mutual funds compound monthly over a
//! number of months, every other type compounds annually over a number of years.
//! The same nominal 13% therefore yields different results for equity and mutual
//! funds over the same calendar time.

use lib_utils::validate_non_negative;
use shared::{Compounding, InvestmentType, ReturnEstimate, ReturnEstimateRequest};
use tracing::debug;

use crate::error::ValidationError;

/// Nominal annual rate applied to equity and mutual funds, in percent.
pub const FIXED_FUND_RATE_PERCENT: f64 = 13.0;

/// Annual rate (percent) that applies to `kind`.
///
/// Fund types ignore `user_rate`; stocks and gold require it.
pub fn resolve_rate(kind: InvestmentType, user_rate: Option<f64>) -> Result<f64, ValidationError> {
    match kind {
        InvestmentType::EquityFunds | InvestmentType::MutualFunds => Ok(FIXED_FUND_RATE_PERCENT),
        InvestmentType::Stocks | InvestmentType::Gold => user_rate
            .filter(|rate| rate.is_finite())
            .ok_or(ValidationError::MissingRate(kind)),
    }
}

/// `amount * (1 + r)^periods` with `r = rate/100/12` for monthly and `rate/100` for annual compounding.
pub fn project_value(amount: f64, rate_percent: f64, periods: u32, compounding: Compounding) -> f64 {
    let per_period = match compounding {
        Compounding::Monthly => rate_percent / 100.0 / 12.0,
        Compounding::Annual => rate_percent / 100.0,
    };
    amount * (1.0 + per_period).powf(f64::from(periods))
}

/// Estimate the value of an investment at the end of `request.periods`.
///
/// # Errors
///
/// - [`ValidationError::InvalidInvestmentType`] for a label outside the closed set
/// - [`ValidationError::NegativeAmount`] for a negative or non-numeric amount
/// - [`ValidationError::MissingRate`] for stocks or gold without a rate
pub fn compute_return(request: &ReturnEstimateRequest) -> Result<ReturnEstimate, ValidationError> {
    let investment_type: InvestmentType = request
        .investment_type
        .parse()
        .map_err(|_| ValidationError::InvalidInvestmentType(request.investment_type.clone()))?;

    validate_non_negative(request.amount, "amount").map_err(|_| ValidationError::NegativeAmount)?;

    let rate_percent = resolve_rate(investment_type, request.rate)?;
    let compounding = investment_type.compounding();
    let projected_value = project_value(request.amount, rate_percent, request.periods, compounding);

    debug!(
        investment_type = investment_type.label(),
        rate_percent,
        periods = request.periods,
        projected_value,
        "return estimate computed"
    );

    Ok(ReturnEstimate {
        investment_type,
        projected_value,
        rate_percent,
        periods: request.periods,
        compounding,
    })
}
