//! Planner DTOs: savings plan and investment return requests/results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of investment types the return estimator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    EquityFunds,
    MutualFunds,
    Stocks,
    Gold,
}

impl InvestmentType {
    /// All types, in the order the page lists them.
    pub const ALL: [InvestmentType; 4] = [
        InvestmentType::EquityFunds,
        InvestmentType::MutualFunds,
        InvestmentType::Stocks,
        InvestmentType::Gold,
    ];

    /// Human readable label, as shown in the type selector.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentType::EquityFunds => "Equity Funds",
            InvestmentType::MutualFunds => "Mutual Funds",
            InvestmentType::Stocks => "Stocks",
            InvestmentType::Gold => "Gold",
        }
    }

    /// Whether the user has to supply an interest rate for this type.
    pub fn requires_rate(&self) -> bool {
        matches!(self, InvestmentType::Stocks | InvestmentType::Gold)
    }

    /// Compounding frequency, which also fixes the unit of `periods`.
    pub fn compounding(&self) -> Compounding {
        match self {
            InvestmentType::MutualFunds => Compounding::Monthly,
            _ => Compounding::Annual,
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label does not name one of the [`InvestmentType`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInvestmentType(pub String);

impl fmt::Display for UnknownInvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown investment type: {}", self.0)
    }
}

impl std::error::Error for UnknownInvestmentType {}

impl FromStr for InvestmentType {
    type Err = UnknownInvestmentType;

    /// Accepts both the display label ("Mutual Funds") and the variant name
    /// ("MutualFunds", "mutual_funds"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "equityfunds" => Ok(InvestmentType::EquityFunds),
            "mutualfunds" => Ok(InvestmentType::MutualFunds),
            "stocks" => Ok(InvestmentType::Stocks),
            "gold" => Ok(InvestmentType::Gold),
            _ => Err(UnknownInvestmentType(s.to_string())),
        }
    }
}

/// How often interest is compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    /// `periods` counts months, rate is divided by 12
    Monthly,
    /// `periods` counts years
    Annual,
}

impl Compounding {
    /// Unit of the `periods` field for this compounding frequency.
    pub fn period_unit(&self) -> &'static str {
        match self {
            Compounding::Monthly => "months",
            Compounding::Annual => "years",
        }
    }
}

/// Savings planner input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlanRequest {
    /// Target amount (ETH)
    pub goal: f64,
    /// Amount already saved (ETH)
    pub current_balance: f64,
    /// Calendar date the goal should be reached by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

/// Savings planner output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Required contribution per month; negative when the goal is already met
    pub monthly_amount: f64,
    /// Whole months between now and the target date
    pub months: u32,
    pub target_date: NaiveDate,
}

impl SavingsPlan {
    /// `true` when no further saving is needed.
    pub fn goal_reached(&self) -> bool {
        self.monthly_amount <= 0.0
    }

    /// One-line summary, also used as the on-chain memo text.
    pub fn summary(&self) -> String {
        format!("Monthly savings: {:.2} ETH", self.monthly_amount)
    }
}

/// Return estimator input, as collected by the page form.
///
/// `investment_type` is kept as the raw label so that an unknown type can be
/// rejected by the estimator instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnEstimateRequest {
    pub investment_type: String,
    /// Invested amount (ETH)
    pub amount: f64,
    /// Months for mutual funds, years otherwise
    pub periods: u32,
    /// Annual interest rate in percent; required for stocks and gold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// Return estimator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnEstimate {
    pub investment_type: InvestmentType,
    pub projected_value: f64,
    /// Nominal annual rate actually applied
    pub rate_percent: f64,
    pub periods: u32,
    pub compounding: Compounding,
}

impl ReturnEstimate {
    /// One-line summary, also used as the on-chain memo text.
    pub fn summary(&self) -> String {
        format!("Investment return: {:.2} ETH", self.projected_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investment_type_from_label() {
        assert_eq!("Equity Funds".parse(), Ok(InvestmentType::EquityFunds));
        assert_eq!("Mutual Funds".parse(), Ok(InvestmentType::MutualFunds));
        assert_eq!("stocks".parse(), Ok(InvestmentType::Stocks));
        assert_eq!("GOLD".parse(), Ok(InvestmentType::Gold));
    }

    #[test]
    fn test_investment_type_from_variant_name() {
        assert_eq!("MutualFunds".parse(), Ok(InvestmentType::MutualFunds));
        assert_eq!("equity_funds".parse(), Ok(InvestmentType::EquityFunds));
    }

    #[test]
    fn test_investment_type_unknown() {
        let err = "Real Estate".parse::<InvestmentType>().unwrap_err();
        assert_eq!(err, UnknownInvestmentType("Real Estate".to_string()));
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        for kind in InvestmentType::ALL {
            assert_eq!(kind.label().parse::<InvestmentType>(), Ok(kind));
        }
    }

    #[test]
    fn test_compounding_per_type() {
        assert_eq!(InvestmentType::MutualFunds.compounding(), Compounding::Monthly);
        assert_eq!(InvestmentType::EquityFunds.compounding(), Compounding::Annual);
        assert_eq!(InvestmentType::Gold.compounding().period_unit(), "years");
    }

    #[test]
    fn test_summaries() {
        let plan = SavingsPlan {
            monthly_amount: 12.345,
            months: 4,
            target_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        };
        assert_eq!(plan.summary(), "Monthly savings: 12.35 ETH");
        assert!(!plan.goal_reached());

        let estimate = ReturnEstimate {
            investment_type: InvestmentType::Stocks,
            projected_value: 1210.0,
            rate_percent: 10.0,
            periods: 2,
            compounding: Compounding::Annual,
        };
        assert_eq!(estimate.summary(), "Investment return: 1210.00 ETH");
    }
}
