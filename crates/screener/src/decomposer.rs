//! Splits an option's composite name into right, strike, and expiry token.
//!
//! Option names look like `اختيارخ فولاد-5000-1404/06/12`: the first segment
//! names the right and underlying, the second the strike, the third the
//! expiry in the Jalali calendar.

use tse_options_core::{is_option_code, ContractType, MarketRow};

use crate::coerce::int_or_zero;
use crate::universe::CALL_PREFIX;

/// Parts extracted from a row's full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolParts {
    pub contract_type: ContractType,
    pub strike_price: i64,
    pub expiration_token: String,
}

impl SymbolParts {
    fn base() -> Self {
        Self {
            contract_type: ContractType::Base,
            strike_price: 0,
            expiration_token: MarketRow::NO_EXPIRY.to_string(),
        }
    }
}

/// Decomposes `full_name` for option industry codes; other codes yield `Base`.
#[must_use]
pub fn decompose(full_name: &str, industry_code: i64) -> SymbolParts {
    if !is_option_code(industry_code) {
        return SymbolParts::base();
    }

    let mut parts = full_name.split('-');
    let contract_type = match parts.next() {
        Some(head) if head.starts_with(CALL_PREFIX) => ContractType::Call,
        _ => ContractType::Put,
    };
    let strike_price = parts.next().map_or(0, int_or_zero);
    let expiration_token = parts
        .next()
        .map_or_else(|| MarketRow::NO_EXPIRY.to_string(), str::to_string);

    SymbolParts {
        contract_type,
        strike_price,
        expiration_token,
    }
}

/// Fills contract type, strike, and expiry token on every row.
pub fn apply(rows: &mut [MarketRow]) {
    for row in rows {
        let parts = decompose(&row.full_name, row.industry_code);
        row.contract_type = parts.contract_type;
        row.strike_price = parts.strike_price;
        row.expiration_token = parts.expiration_token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_name() {
        let name = format!("{CALL_PREFIX} فولاد-5000-1404/06/12");
        let parts = decompose(&name, 311);
        assert_eq!(parts.contract_type, ContractType::Call);
        assert_eq!(parts.strike_price, 5000);
        assert_eq!(parts.expiration_token, "1404/06/12");
    }

    #[test]
    fn test_put_name() {
        let parts = decompose("اختيارف فولاد-4500-040612", 320);
        assert_eq!(parts.contract_type, ContractType::Put);
        assert_eq!(parts.strike_price, 4500);
        assert_eq!(parts.expiration_token, "040612");
    }

    #[test]
    fn test_call_prefix_must_lead_first_segment() {
        let name = format!("فولاد {CALL_PREFIX}-5000-040612");
        assert_eq!(decompose(&name, 311).contract_type, ContractType::Put);
    }

    #[test]
    fn test_missing_segments() {
        let parts = decompose("اختيارف فولاد", 312);
        assert_eq!(parts.contract_type, ContractType::Put);
        assert_eq!(parts.strike_price, 0);
        assert_eq!(parts.expiration_token, "NA");

        let parts = decompose("اختيارف فولاد-abc", 312);
        assert_eq!(parts.strike_price, 0);
        assert_eq!(parts.expiration_token, "NA");
    }

    #[test]
    fn test_non_option_code_is_base() {
        let name = format!("{CALL_PREFIX} فولاد-5000-040612");
        assert_eq!(decompose(&name, 270), SymbolParts::base());
    }

    #[test]
    fn test_apply_sets_fields() {
        let mut rows = vec![
            MarketRow::new(321, "ضفلا", format!("{CALL_PREFIX} فولاد-700-14041230"), 1, 1),
            MarketRow::new(0, "فولاد", "فولاد مباركه", 1, 1),
        ];
        apply(&mut rows);

        assert_eq!(rows[0].contract_type, ContractType::Call);
        assert_eq!(rows[0].strike_price, 700);
        assert_eq!(rows[0].expiration_token, "14041230");
        assert_eq!(rows[1].contract_type, ContractType::Base);
    }
}
