use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LedgerError;
use crate::model::{Contribution, ContributionRate, Visits};

/// Rounds to cents, half away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Amounts for `visits` at `rate`. Fails instead of overflowing.
pub fn contribution_for(
    visits: Visits,
    rate: &ContributionRate,
) -> Result<Contribution, LedgerError> {
    let count = Decimal::from(visits.count());
    let employer_rate = rate.employer_rate().ok_or_else(|| overflow(rate))?;
    let amount = |fraction: Decimal| {
        rate.base_amount
            .checked_mul(fraction)
            .and_then(|per_visit| per_visit.checked_mul(count))
            .map(round2)
            .ok_or_else(|| overflow(rate))
    };
    Ok(Contribution {
        employer: amount(employer_rate)?,
        employee: amount(rate.employee_rate)?,
    })
}

fn overflow(rate: &ContributionRate) -> LedgerError {
    LedgerError::Validation(format!(
        "contribution overflows for base amount {}",
        rate.base_amount
    ))
}

/// Employer and employee amounts for a raw visit count.
///
/// Counts outside 0..=2 are rejected rather than clamped.
pub fn compute_contribution(
    visit_count: u8,
    rate: &ContributionRate,
) -> Result<Contribution, LedgerError> {
    let visits = Visits::try_from(visit_count)?;
    contribution_for(visits, rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    #[test]
    fn test_default_rate_amounts() {
        let rate = ContributionRate::default();

        let once = compute_contribution(1, &rate).unwrap();
        assert_eq!(once.employer, dec(4810, 2));
        assert_eq!(once.employee, dec(1560, 2));

        let twice = compute_contribution(2, &rate).unwrap();
        assert_eq!(twice.employer, dec(9620, 2));
        assert_eq!(twice.employee, dec(3120, 2));
    }

    #[test]
    fn test_zero_visits_is_zero_for_any_rate() {
        let rates = [
            ContributionRate::default(),
            ContributionRate::flat(dec(1, 0), dec(1, 0), dec(1, 0)),
            ContributionRate::flat(dec(99999, 2), dec(333, 3), dec(7, 1)),
        ];
        for rate in rates {
            let c = compute_contribution(0, &rate).unwrap();
            assert_eq!(c.employer, Decimal::ZERO);
            assert_eq!(c.employee, Decimal::ZERO);
        }
    }

    #[test]
    fn test_linear_in_visit_count() {
        let rates = [
            ContributionRate::default(),
            ContributionRate::flat(dec(300, 0), dec(15, 2), dec(5, 2)),
            ContributionRate::flat(dec(180, 0), dec(2, 1), dec(1, 1)),
        ];
        for rate in rates {
            let once = compute_contribution(1, &rate).unwrap();
            let twice = compute_contribution(2, &rate).unwrap();
            assert_eq!(twice.employer, once.employer * dec(2, 0));
            assert_eq!(twice.employee, once.employee * dec(2, 0));
        }
    }

    #[test]
    fn test_rejects_out_of_range_count() {
        let err = compute_contribution(3, &ContributionRate::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_huge_rate_is_an_error_not_a_panic() {
        let rate = ContributionRate {
            base_amount: Decimal::MAX,
            pension_rate: Decimal::ONE,
            benefits_rate: Decimal::ONE,
            employee_rate: Decimal::ZERO,
        };
        let err = compute_contribution(1, &rate).unwrap_err();
        assert!(err.is_validation());
        assert!(contribution_for(Visits::Twice, &rate).is_err());

        let summed = ContributionRate::flat(Decimal::ONE, Decimal::MAX, Decimal::ZERO);
        let summed = ContributionRate { benefits_rate: Decimal::MAX, ..summed };
        assert!(compute_contribution(1, &summed).unwrap_err().is_validation());
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(dec(1005, 3)), dec(101, 2));
        assert_eq!(round2(dec(1004, 3)), dec(100, 2));
        assert_eq!(round2(dec(-1005, 3)), dec(-101, 2));
    }

    #[test]
    fn test_amounts_rounded_to_cents() {
        // 100 * 0.12345 = 12.345
        let rate = ContributionRate::flat(dec(100, 0), dec(12345, 5), dec(12344, 5));
        let c = compute_contribution(1, &rate).unwrap();
        assert_eq!(c.employer, dec(1235, 2));
        assert_eq!(c.employee, dec(1234, 2));
    }
}
