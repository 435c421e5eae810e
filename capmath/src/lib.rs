//! Gridcap CapMath
//!
//! Pure salary-cap arithmetic. Every function is deterministic, takes all
//! of its inputs explicitly, and returns whole-dollar amounts; malformed
//! input fails with a typed error rather than being clamped.

mod error;
mod impact;
mod proration;
mod signing;

pub use error::{CapMathError, CapMathResult};
pub use impact::{
    acquisition_cap_hit, contract_cap_hit, guaranteed_remaining, release_impact, trade_impact,
    CapImpact,
};
pub use proration::{annual_proration, proration_schedule, MAX_PRORATION_YEARS};
pub use signing::{build_contract_years, signing_cap_hit, SigningTerms};

use gridcap_core::{ContractYear, Money};

/// The cap charge for a season row: base + proration + roster bonus +
/// workout bonus. Fails with `InvalidContractYear` if any component is
/// negative.
pub fn cap_hit(year: &ContractYear) -> CapMathResult<Money> {
    for (name, amount) in [
        ("base_salary", year.base_salary),
        ("signing_proration", year.signing_proration),
        ("roster_bonus", year.roster_bonus),
        ("workout_bonus", year.workout_bonus),
        ("guaranteed", year.guaranteed),
    ] {
        if amount.is_negative() {
            return Err(CapMathError::invalid_contract_year(format!(
                "{} is negative ({}) for season {}",
                name, amount, year.season
            )));
        }
    }
    Ok(year.cap_hit())
}
