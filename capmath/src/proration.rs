//! Signing-bonus proration.

use gridcap_core::Money;

use crate::error::{CapMathError, CapMathResult};

/// A signing bonus prorates over at most this many contract years.
pub const MAX_PRORATION_YEARS: u8 = 5;

/// The even per-year proration amount (the amount charged in every year
/// except the first, which also absorbs the division remainder).
pub fn annual_proration(total_signing_bonus: Money, proration_years: u8) -> CapMathResult<Money> {
    let schedule = proration_schedule(total_signing_bonus, proration_years)?;
    Ok(*schedule.last().expect("schedule has at least one year"))
}

/// Spread a signing bonus across `proration_years` whole-dollar charges.
///
/// The amounts always sum back to the bonus exactly: the first year absorbs
/// any division remainder. Fails with `InvalidProrationSchedule` outside
/// 1..=5 years and `InvalidContractYear` for a negative bonus.
pub fn proration_schedule(
    total_signing_bonus: Money,
    proration_years: u8,
) -> CapMathResult<Vec<Money>> {
    if proration_years < 1 || proration_years > MAX_PRORATION_YEARS {
        return Err(CapMathError::InvalidProrationSchedule {
            years: proration_years,
        });
    }
    if total_signing_bonus.is_negative() {
        return Err(CapMathError::invalid_contract_year(format!(
            "signing bonus is negative ({})",
            total_signing_bonus
        )));
    }

    let years = proration_years as i64;
    let per_year = total_signing_bonus.dollars() / years;
    let remainder = total_signing_bonus.dollars() - per_year * years;

    let mut schedule = vec![Money::from_dollars(per_year); proration_years as usize];
    schedule[0] += Money::from_dollars(remainder);
    Ok(schedule)
}
