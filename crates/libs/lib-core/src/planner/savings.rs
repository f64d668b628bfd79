//! Savings planner: required monthly contribution.

use chrono::{DateTime, Utc};
use lib_utils::{date_start_utc, validate_non_negative};
use shared::{SavingsPlan, SavingsPlanRequest};
use tracing::debug;

use crate::error::ValidationError;

/// Average month length used to turn a time span into whole months.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Compute the monthly contribution needed to reach `request.goal` by the target date.
///
/// `months = floor((target - now) / 30.44 days)` and
/// `monthly_amount = (goal - current_balance) / months`. A negative amount is a
/// valid result and means the goal is already met.
///
/// The target date is taken as midnight UTC at its start.
///
/// # Errors
///
/// - [`ValidationError::MissingTargetDate`], [`ValidationError::NonPositiveGoal`],
///   [`ValidationError::NegativeBalance`] for incomplete input
/// - [`ValidationError::TargetDateNotInFuture`] when `target <= now`
/// - [`ValidationError::DegenerateInterval`] when the target lies within the
///   current ~30-day window (zero whole months)
pub fn compute_monthly_savings(
    request: &SavingsPlanRequest,
    now: DateTime<Utc>,
) -> Result<SavingsPlan, ValidationError> {
    let target_date = request.target_date.ok_or(ValidationError::MissingTargetDate)?;

    // Negated so NaN is rejected too
    if !(request.goal > 0.0) {
        return Err(ValidationError::NonPositiveGoal);
    }
    validate_non_negative(request.current_balance, "current balance")
        .map_err(|_| ValidationError::NegativeBalance)?;

    let target = date_start_utc(target_date);
    if target <= now {
        return Err(ValidationError::TargetDateNotInFuture);
    }

    let millis = (target - now).num_milliseconds() as f64;
    let months = (millis / (MILLIS_PER_DAY * AVERAGE_DAYS_PER_MONTH)).floor();
    if months <= 0.0 {
        return Err(ValidationError::DegenerateInterval {
            days: millis / MILLIS_PER_DAY,
        });
    }

    let monthly_amount = (request.goal - request.current_balance) / months;
    debug!(months, monthly_amount, "savings plan computed");

    Ok(SavingsPlan {
        monthly_amount,
        months: months as u32,
        target_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn request(goal: f64, current_balance: f64, target: Option<(i32, u32, u32)>) -> SavingsPlanRequest {
        SavingsPlanRequest {
            goal,
            current_balance,
            target_date: target.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        }
    }

    #[test]
    fn test_monthly_amount_uses_whole_months() {
        // 363.5 days -> floor(363.5 / 30.44) = 11 months
        let plan = compute_monthly_savings(&request(1200.0, 300.0, Some((2030, 12, 31))), now()).unwrap();
        assert_eq!(plan.months, 11);
        assert_eq!(plan.monthly_amount, 900.0 / 11.0);
        assert_eq!(plan.target_date, NaiveDate::from_ymd_opt(2030, 12, 31).unwrap());
    }

    #[test]
    fn test_goal_already_met_is_negative_not_error() {
        let plan = compute_monthly_savings(&request(100.0, 400.0, Some((2030, 7, 1))), now()).unwrap();
        assert!(plan.monthly_amount < 0.0);
        assert!(plan.goal_reached());
    }

    #[test]
    fn test_missing_date_rejected() {
        let err = compute_monthly_savings(&request(100.0, 0.0, None), now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingTargetDate);
    }

    #[test]
    fn test_goal_must_be_positive() {
        let err = compute_monthly_savings(&request(0.0, 0.0, Some((2031, 1, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveGoal);

        let err = compute_monthly_savings(&request(f64::NAN, 0.0, Some((2031, 1, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveGoal);
    }

    #[test]
    fn test_negative_balance_rejected() {
        let err = compute_monthly_savings(&request(100.0, -1.0, Some((2031, 1, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::NegativeBalance);

        let err = compute_monthly_savings(&request(100.0, f64::NAN, Some((2031, 1, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::NegativeBalance);
    }

    #[test]
    fn test_past_or_present_target_rejected() {
        let err = compute_monthly_savings(&request(100.0, 0.0, Some((2029, 12, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::TargetDateNotInFuture);

        // Midnight of today is already behind a noon `now`
        let err = compute_monthly_savings(&request(100.0, 0.0, Some((2030, 1, 1))), now()).unwrap_err();
        assert_eq!(err, ValidationError::TargetDateNotInFuture);
    }

    #[test]
    fn test_target_within_a_month_is_degenerate() {
        let err = compute_monthly_savings(&request(100.0, 0.0, Some((2030, 1, 20))), now()).unwrap_err();
        match err {
            ValidationError::DegenerateInterval { days } => assert_eq!(days, 18.5),
            other => panic!("expected DegenerateInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_just_over_one_month() {
        // 31.5 days out -> exactly one whole month
        let plan = compute_monthly_savings(&request(50.0, 20.0, Some((2030, 2, 2))), now()).unwrap();
        assert_eq!(plan.months, 1);
        assert_eq!(plan.monthly_amount, 30.0);
    }
}
