//! Jalali expiry tokens to Gregorian dates and days-to-expiration.
//!
//! Jalali leap years follow the 33-year arithmetic cycle. Day counting
//! starts at 1 Farvardin 979, which is 1600-03-20 in the Gregorian calendar.

use chrono::{Days, NaiveDate};
use tse_options_core::{Dte, MarketRow};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9377;

/// Jalali year whose first day anchors the day count.
const EPOCH_YEAR: i64 = 979;

/// Days from 1600-01-01 to 1 Farvardin of [`EPOCH_YEAR`].
const EPOCH_OFFSET_DAYS: i64 = 79;

/// Century prefix applied to two-digit years in six-digit tokens.
const SHORT_YEAR_PREFIX: &str = "14";

const MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Returns true for Jalali leap years.
#[must_use]
pub fn is_jalali_leap(year: i32) -> bool {
    matches!(year.rem_euclid(33), 1 | 5 | 9 | 13 | 17 | 22 | 26 | 30)
}

/// Number of days in a Jalali month, or `None` for an invalid month.
#[must_use]
pub fn jalali_month_days(year: i32, month: u32) -> Option<u32> {
    match month {
        12 if is_jalali_leap(year) => Some(30),
        1..=12 => Some(MONTH_DAYS[(month - 1) as usize]),
        _ => None,
    }
}

/// Converts a Jalali date to Gregorian, or `None` if the date is invalid.
#[must_use]
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    if day == 0 || day > jalali_month_days(year, month)? {
        return None;
    }

    let jy = i64::from(year) - EPOCH_YEAR;
    let mut day_number = 365 * jy + jy.div_euclid(33) * 8 + (jy.rem_euclid(33) + 3) / 4;
    day_number += MONTH_DAYS[..(month - 1) as usize]
        .iter()
        .map(|&d| i64::from(d))
        .sum::<i64>();
    day_number += i64::from(day) - 1;

    let offset = day_number + EPOCH_OFFSET_DAYS;
    let origin = NaiveDate::from_ymd_opt(1600, 1, 1)?;
    if offset >= 0 {
        origin.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        origin.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Reads `(year, month, day)` from an expiry token.
///
/// Slashes are ignored. Six digits read as `yymmdd` in the 1400s; eight
/// digits read as `yyyymmdd`. Persian and Arabic-Indic digits are accepted.
#[must_use]
pub fn parse_expiry_token(token: &str) -> Option<(i32, u32, u32)> {
    let digits: String = token
        .chars()
        .filter(|&c| c != '/')
        .map(ascii_digit)
        .collect::<Option<String>>()?;

    let full = match digits.len() {
        6 => format!("{SHORT_YEAR_PREFIX}{digits}"),
        8 => digits,
        _ => return None,
    };

    let year = full[..4].parse().ok()?;
    let month = full[4..6].parse().ok()?;
    let day = full[6..8].parse().ok()?;
    Some((year, month, day))
}

fn ascii_digit(c: char) -> Option<char> {
    let value = match c {
        '0'..='9' => return Some(c),
        '\u{06F0}'..='\u{06F9}' => u32::from(c) - 0x06F0,
        '\u{0660}'..='\u{0669}' => u32::from(c) - 0x0660,
        _ => return None,
    };
    char::from_digit(value, 10)
}

/// Days from `today` until the token's date, clamped at 0.
#[must_use]
pub fn days_to_expiry(token: &str, today: NaiveDate) -> Dte {
    if token == MarketRow::NO_EXPIRY {
        return Dte::NotAvailable;
    }

    parse_expiry_token(token)
        .and_then(|(y, m, d)| jalali_to_gregorian(y, m, d))
        .map_or(Dte::NotAvailable, |expiry| {
            Dte::from_day_diff((expiry - today).num_days())
        })
}

/// Sets DTE on every row; non-option rows get `NotAvailable`.
pub fn apply(rows: &mut [MarketRow], today: NaiveDate) {
    for row in rows {
        row.dte = if row.is_option() {
            days_to_expiry(&row.expiration_token, today)
        } else {
            Dte::NotAvailable
        };
    }
}
