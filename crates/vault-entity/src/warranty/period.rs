//! Expiry date arithmetic.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vault_core::AppError;

/// Unit of a warranty period.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "period_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Days,
    #[default]
    Months,
}

impl PeriodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" => Ok(Self::Days),
            "months" => Ok(Self::Months),
            _ => Err(AppError::validation(format!(
                "Invalid period unit: '{s}'. Expected one of: days, months"
            ))),
        }
    }
}

/// Expiry date for a purchase date and period, or `None` when the result
/// falls outside the representable calendar.
///
/// Months advance the year/month and clamp the day to the end of the target
/// month, so Jan 31 + 1 month is Feb 28 (Feb 29 in leap years).
pub fn checked_expiry(purchase_date: NaiveDate, period: u32, unit: PeriodUnit) -> Option<NaiveDate> {
    match unit {
        PeriodUnit::Days => purchase_date.checked_add_days(Days::new(u64::from(period))),
        PeriodUnit::Months => purchase_date.checked_add_months(Months::new(period)),
    }
}

/// Infallible form of [`checked_expiry`]; saturates at the last
/// representable date.
pub fn compute_expiry(purchase_date: NaiveDate, period: u32, unit: PeriodUnit) -> NaiveDate {
    checked_expiry(purchase_date, period, unit).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn month_end_clamps_in_leap_year() {
        assert_eq!(compute_expiry(d(2024, 1, 31), 1, PeriodUnit::Months), d(2024, 2, 29));
    }

    #[test]
    fn month_end_clamps_in_common_year() {
        assert_eq!(compute_expiry(d(2025, 1, 31), 1, PeriodUnit::Months), d(2025, 2, 28));
    }

    #[test]
    fn months_carry_into_following_years() {
        assert_eq!(compute_expiry(d(2025, 11, 15), 14, PeriodUnit::Months), d(2027, 1, 15));
        assert_eq!(compute_expiry(d(2025, 1, 1), 12, PeriodUnit::Months), d(2026, 1, 1));
        assert_eq!(compute_expiry(d(2023, 8, 31), 6, PeriodUnit::Months), d(2024, 2, 29));
    }

    #[test]
    fn month_arithmetic_matches_year_month_formula() {
        let starts = [d(2024, 1, 31), d(2023, 3, 30), d(2025, 12, 31), d(2020, 2, 29)];
        for start in starts {
            for period in 1..=48u32 {
                let got = compute_expiry(start, period, PeriodUnit::Months);
                let total = start.month0() + period;
                let year = start.year() + (total / 12) as i32;
                let month = total % 12 + 1;
                assert_eq!(got.year(), year, "{start} + {period}");
                assert_eq!(got.month(), month, "{start} + {period}");
                let last_day = d(year, month, 1)
                    .checked_add_months(Months::new(1))
                    .and_then(|n| n.pred_opt())
                    .expect("last day")
                    .day();
                assert_eq!(got.day(), start.day().min(last_day), "{start} + {period}");
            }
        }
    }

    #[test]
    fn days_are_calendar_accurate() {
        assert_eq!(compute_expiry(d(2024, 2, 28), 1, PeriodUnit::Days), d(2024, 2, 29));
        assert_eq!(compute_expiry(d(2025, 2, 28), 1, PeriodUnit::Days), d(2025, 3, 1));
        assert_eq!(compute_expiry(d(2025, 12, 20), 30, PeriodUnit::Days), d(2026, 1, 19));
        let start = d(2024, 1, 1);
        for period in [1u32, 7, 90, 366, 1000] {
            let got = compute_expiry(start, period, PeriodUnit::Days);
            assert_eq!((got - start).num_days(), i64::from(period));
        }
    }

    #[test]
    fn overflow_is_reported_by_checked_variant() {
        assert_eq!(checked_expiry(NaiveDate::MAX, 1, PeriodUnit::Days), None);
        assert_eq!(compute_expiry(NaiveDate::MAX, 1, PeriodUnit::Months), NaiveDate::MAX);
    }

    #[test]
    fn unit_parses_lowercase_tags() {
        assert_eq!("Days".parse::<PeriodUnit>().ok(), Some(PeriodUnit::Days));
        assert!("weeks".parse::<PeriodUnit>().is_err());
        assert_eq!(PeriodUnit::default(), PeriodUnit::Months);
    }
}
