//! Market rows produced by one refresh cycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Industry codes that mark a row as an option contract.
pub const OPTION_INDUSTRY_CODES: [i64; 4] = [311, 312, 320, 321];

/// Returns true if the industry code belongs to an option contract.
#[must_use]
pub fn is_option_code(code: i64) -> bool {
    OPTION_INDUSTRY_CODES.contains(&code)
}

/// One delimited feed row, fields in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    /// Minimum field count a row needs to carry the industry code.
    pub const MIN_FIELDS: usize = 23;

    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Returns the field at `index`, or an empty string when absent.
    #[must_use]
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&str> for RawRecord {
    fn from(row: &str) -> Self {
        Self::new(row.split(',').map(str::to_string).collect())
    }
}

/// Option right, or `Base` for underlying instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    Call,
    Put,
    Base,
}

impl ContractType {
    #[must_use]
    pub const fn is_option(self) -> bool {
        matches!(self, Self::Call | Self::Put)
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
            Self::Base => write!(f, "Base"),
        }
    }
}

/// Days to expiration.
///
/// Serializes as a plain number, or as the string `"NA"` when the expiry
/// could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dte {
    Days(u32),
    #[default]
    NotAvailable,
}

impl Dte {
    /// Builds a DTE from a signed day difference, clamping past expiries to 0.
    #[must_use]
    pub fn from_day_diff(days: i64) -> Self {
        Self::Days(u32::try_from(days.max(0)).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn days(self) -> Option<u32> {
        match self {
            Self::Days(d) => Some(d),
            Self::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for Dte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(d) => write!(f, "{d}"),
            Self::NotAvailable => write!(f, "NA"),
        }
    }
}

impl Serialize for Dte {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Days(d) => serializer.serialize_u32(*d),
            Self::NotAvailable => serializer.serialize_str("NA"),
        }
    }
}

impl<'de> Deserialize<'de> for Dte {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Days(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Days(d) => Ok(Self::Days(d)),
            Repr::Text(s) if s == "NA" => Ok(Self::NotAvailable),
            Repr::Text(s) => Err(serde::de::Error::custom(format!("invalid DTE: {s}"))),
        }
    }
}

/// A classified, enriched feed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    pub industry_code: i64,
    pub short_symbol: String,
    pub full_name: String,
    pub close_price: i64,
    pub last_price: i64,
    pub contract_type: ContractType,
    pub strike_price: i64,
    pub expiration_token: String,
    pub underlying_symbol: Option<String>,
    pub underlying_last_price: i64,
    pub underlying_close_price: i64,
    pub dte: Dte,
    pub margin: i64,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub daily_return_pct: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub otm_pct: Option<Decimal>,
}

impl MarketRow {
    /// Sentinel for an expiration token that is not present.
    pub const NO_EXPIRY: &'static str = "NA";

    /// Creates a row with only the feed-level fields populated.
    #[must_use]
    pub fn new(
        industry_code: i64,
        short_symbol: impl Into<String>,
        full_name: impl Into<String>,
        close_price: i64,
        last_price: i64,
    ) -> Self {
        Self {
            industry_code,
            short_symbol: short_symbol.into(),
            full_name: full_name.into(),
            close_price,
            last_price,
            contract_type: ContractType::Base,
            strike_price: 0,
            expiration_token: Self::NO_EXPIRY.to_string(),
            underlying_symbol: None,
            underlying_last_price: 0,
            underlying_close_price: 0,
            dte: Dte::NotAvailable,
            margin: 0,
            daily_return_pct: None,
            otm_pct: None,
        }
    }

    /// True when the industry code marks this row as an option contract.
    #[must_use]
    pub fn is_option(&self) -> bool {
        is_option_code(self.industry_code)
    }
}
