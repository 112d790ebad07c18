//! Per-option metrics: required margin, daily return, and OTM percentage.
//!
//! Prices in the feed are per share; one contract covers
//! [`CONTRACT_SIZE`] shares, so money amounts below are per contract.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tse_options_core::{ContractType, Dte, MarketRow};

// =============================================================================
// Constants
// =============================================================================

/// Shares per contract.
pub const CONTRACT_SIZE: Decimal = dec!(1000);

/// Share of the underlying value held against the position.
pub const FACTOR_A: Decimal = dec!(0.20);

/// Floor share of the underlying (call) or strike (put) value.
pub const FACTOR_B: Decimal = dec!(0.10);

/// Margin is rounded up to a multiple of this amount.
pub const ROUNDING_UNIT: Decimal = dec!(10000);

/// Fixed adjustment applied to out-of-the-money amounts below the spot term.
const OTM_ADJUSTMENT: Decimal = dec!(10000);

// =============================================================================
// Margin
// =============================================================================

/// Required margin for one short contract, a non-negative multiple of 10000.
///
/// Returns 0 for `Base` rows.
#[must_use]
pub fn required_margin(
    contract_type: ContractType,
    strike_price: i64,
    underlying_close: i64,
) -> i64 {
    let strike = Decimal::from(strike_price);
    let close = Decimal::from(underlying_close);
    let a_spot = FACTOR_A * close * CONTRACT_SIZE;

    let (a, b_spot) = match contract_type {
        ContractType::Base => return 0,
        ContractType::Call => {
            let otm = (strike - close) * CONTRACT_SIZE;
            let a = if otm <= Decimal::ZERO {
                a_spot
            } else if otm < a_spot {
                a_spot - otm + OTM_ADJUSTMENT
            } else {
                a_spot - otm
            };
            (a, FACTOR_B * close * CONTRACT_SIZE)
        }
        ContractType::Put => {
            let otm = (close - strike) * CONTRACT_SIZE;
            let a = if otm <= Decimal::ZERO {
                a_spot
            } else if otm < a_spot {
                a_spot - otm - OTM_ADJUSTMENT
            } else {
                a_spot - otm
            };
            (a, FACTOR_B * strike * CONTRACT_SIZE + OTM_ADJUSTMENT)
        }
    };

    let floor = a.max(b_spot).max(Decimal::ZERO);
    ((floor / ROUNDING_UNIT).ceil() * ROUNDING_UNIT)
        .to_i64()
        .unwrap_or(0)
}

// =============================================================================
// Returns
// =============================================================================

/// Premium-over-capital return per remaining day, in percent.
///
/// When the margin exceeds the premium, capital at risk is the margin net of
/// the premium received. Returns 0 when any input is missing or zero.
#[must_use]
pub fn daily_return_pct(margin: i64, last_price: i64, dte: Dte) -> Decimal {
    let premium = Decimal::from(last_price) * CONTRACT_SIZE;
    let margin = Decimal::from(margin);

    let days = match dte.days() {
        Some(d) if d > 0 => Decimal::from(d),
        _ => return Decimal::ZERO.round_dp(2),
    };
    if margin <= Decimal::ZERO || premium <= Decimal::ZERO {
        return Decimal::ZERO.round_dp(2);
    }

    let capital = if margin > premium { margin - premium } else { margin };
    (premium / capital / days * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Distance of the strike from the underlying close, in percent.
///
/// Positive means out of the money. `None` without an underlying close.
#[must_use]
pub fn otm_pct(
    contract_type: ContractType,
    strike_price: i64,
    underlying_close: i64,
) -> Option<Decimal> {
    if underlying_close <= 0 {
        return None;
    }
    let strike = Decimal::from(strike_price);
    let close = Decimal::from(underlying_close);

    let distance = match contract_type {
        ContractType::Call => strike - close,
        ContractType::Put => close - strike,
        ContractType::Base => return None,
    };
    Some((distance / close * Decimal::ONE_HUNDRED).round_dp(2))
}

/// Computes margin, daily return, and OTM percentage on every option row.
pub fn apply(rows: &mut [MarketRow]) {
    for row in rows {
        if !row.is_option() {
            row.margin = 0;
            row.daily_return_pct = None;
            row.otm_pct = None;
            continue;
        }

        row.margin =
            required_margin(row.contract_type, row.strike_price, row.underlying_close_price);
        row.daily_return_pct = Some(daily_return_pct(row.margin, row.last_price, row.dte));
        row.otm_pct = otm_pct(row.contract_type, row.strike_price, row.underlying_close_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Margin Tests ====================

    #[test]
    fn test_call_otm_below_spot_term() {
        // otm = 10,000,000 < a_spot = 18,000,000, A = 8,010,000, b = 9,000,000
        assert_eq!(required_margin(ContractType::Call, 100_000, 90_000), 9_000_000);
    }

    #[test]
    fn test_call_in_the_money() {
        // otm <= 0 so A = a_spot = 0.2 * 100 * 1000 = 20,000
        assert_eq!(required_margin(ContractType::Call, 90, 100), 20_000);
    }

    #[test]
    fn test_call_far_otm_uses_b_floor() {
        // otm = 500,000 >= a_spot = 20,000 so A < 0; b = 10,000
        assert_eq!(required_margin(ContractType::Call, 600, 100), 10_000);
    }

    #[test]
    fn test_call_adjustment_rounds_up() {
        // a_spot = 1,000,000, otm = 100,000, A = 910,000; b = 500,000
        assert_eq!(required_margin(ContractType::Call, 5100, 5000), 910_000);
        // a_spot = 1,002,000, otm = 98,000, A = 914,000; b = 501,000
        assert_eq!(required_margin(ContractType::Call, 5108, 5010), 920_000);
    }

    #[test]
    fn test_put_otm_below_spot_term() {
        // otm = (5000 - 4900) * 1000 = 100,000 < a_spot = 1,000,000
        // A = 1,000,000 - 100,000 - 10,000 = 890,000; b = 490,000 + 10,000
        assert_eq!(required_margin(ContractType::Put, 4900, 5000), 890_000);
    }

    #[test]
    fn test_put_in_the_money() {
        // otm < 0, A = a_spot = 1,000,000; b = 510,000 + 10,000
        assert_eq!(required_margin(ContractType::Put, 5100, 5000), 1_000_000);
    }

    #[test]
    fn test_put_far_otm_uses_strike_floor() {
        // otm = 4,000,000 >= a_spot = 1,000,000; b = 100,000 + 10,000
        assert_eq!(required_margin(ContractType::Put, 1000, 5000), 110_000);
    }

    #[test]
    fn test_missing_underlying_price() {
        assert_eq!(required_margin(ContractType::Call, 5000, 0), 0);
        // Put keeps its strike-based floor.
        assert_eq!(required_margin(ContractType::Put, 5000, 0), 510_000);
    }

    #[test]
    fn test_base_has_no_margin() {
        assert_eq!(required_margin(ContractType::Base, 5000, 5000), 0);
    }

    #[test]
    fn test_margin_is_non_negative_multiple() {
        for contract_type in [ContractType::Call, ContractType::Put] {
            for strike in [0, 1, 999, 4321, 10_000, 77_777] {
                for close in [0, 1, 1234, 9999, 50_001] {
                    let margin = required_margin(contract_type, strike, close);
                    assert!(margin >= 0);
                    assert_eq!(margin % 10_000, 0);
                }
            }
        }
    }

    // ==================== Return Tests ====================

    #[test]
    fn test_return_margin_above_premium() {
        // premium = 100,000; capital = 900,000; 100,000 / 900,000 / 10 * 100 = 1.111..
        let pct = daily_return_pct(1_000_000, 100, Dte::Days(10));
        assert_eq!(pct, dec!(1.11));
    }

    #[test]
    fn test_return_premium_above_margin() {
        // premium = 2,000,000 > margin = 1,000,000; 2 / 4 * 100 = 50
        let pct = daily_return_pct(1_000_000, 2000, Dte::Days(4));
        assert_eq!(pct, dec!(50.00));
    }

    #[test]
    fn test_return_zero_when_dte_missing_or_zero() {
        assert_eq!(daily_return_pct(1_000_000, 100, Dte::NotAvailable), dec!(0.00));
        assert_eq!(daily_return_pct(1_000_000, 100, Dte::Days(0)), dec!(0.00));
    }

    #[test]
    fn test_return_zero_without_premium_or_margin() {
        assert_eq!(daily_return_pct(1_000_000, 0, Dte::Days(5)), dec!(0.00));
        assert_eq!(daily_return_pct(0, 100, Dte::Days(5)), dec!(0.00));
    }

    // ==================== OTM Tests ====================

    #[test]
    fn test_otm_call_and_put() {
        assert_eq!(otm_pct(ContractType::Call, 110, 100), Some(dec!(10.00)));
        assert_eq!(otm_pct(ContractType::Put, 110, 100), Some(dec!(-10.00)));
        assert_eq!(otm_pct(ContractType::Call, 1000, 3000), Some(dec!(-66.67)));
    }

    #[test]
    fn test_otm_unset_without_close() {
        assert_eq!(otm_pct(ContractType::Call, 110, 0), None);
        assert_eq!(otm_pct(ContractType::Put, 0, 0), None);
    }

    // ==================== Apply Tests ====================

    #[test]
    fn test_apply_option_and_base() {
        let mut option = MarketRow::new(311, "ضفلا", "x", 0, 100);
        option.contract_type = ContractType::Call;
        option.strike_price = 5100;
        option.underlying_close_price = 5000;
        option.dte = Dte::Days(10);

        let base = MarketRow::new(270, "فولاد", "x", 5000, 5000);
        let mut rows = vec![option, base];
        apply(&mut rows);

        assert_eq!(rows[0].margin, 910_000);
        // 100,000 / 810,000 / 10 * 100 = 1.2345..
        assert_eq!(rows[0].daily_return_pct, Some(dec!(1.23)));
        assert_eq!(rows[0].otm_pct, Some(dec!(2.00)));

        assert_eq!(rows[1].margin, 0);
        assert_eq!(rows[1].daily_return_pct, None);
        assert_eq!(rows[1].otm_pct, None);
    }
}
