//! Validity date classification.
//!
//! License validity dates arrive as `dd/mm/yyyy` text typed by operators. The
//! classifier never fails: anything it cannot read is [`ValidityClass::NoData`].
//! Parsing follows the lenient rules the dataset was authored against:
//! `parseInt`-style components, day/month overflow rolling into the next
//! month/year, and two-digit years meaning 19xx.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days before expiry during which a license counts as "near expiry".
pub const NEAR_EXPIRY_DAYS: i64 = 90;

/// Freshness of a validity date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidityClass {
    /// Missing or unreadable date.
    NoData,
    /// The date is in the past.
    Expired,
    /// Expires today or within [`NEAR_EXPIRY_DAYS`].
    NearExpiry,
    /// Expires later than that.
    Ok,
}

impl ValidityClass {
    /// Classifies `date` (`dd/mm/yyyy`) against `today`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use licensemap::domain::ValidityClass;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// assert_eq!(ValidityClass::classify(Some("01/01/2020"), today), ValidityClass::Expired);
    /// assert_eq!(ValidityClass::classify(Some("30/08/2025"), today), ValidityClass::NearExpiry);
    /// assert_eq!(ValidityClass::classify(Some("sem data"), today), ValidityClass::NoData);
    /// ```
    #[must_use]
    pub fn classify(date: Option<&str>, today: NaiveDate) -> Self {
        let Some(date) = date.and_then(parse_br_date) else {
            return Self::NoData;
        };

        let days = (date - today).num_days();
        if days < 0 {
            Self::Expired
        } else if days <= NEAR_EXPIRY_DAYS {
            Self::NearExpiry
        } else {
            Self::Ok
        }
    }
}

/// Parses `dd/mm/yyyy` into a calendar date.
///
/// Returns `None` unless the text has exactly three `/`-separated components
/// that each start with an integer.
#[must_use]
pub fn parse_br_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parse_leading_int(parts[0])?;
    let month = parse_leading_int(parts[1])? - 1;
    let mut year = parse_leading_int(parts[2])?;
    if (0..=99).contains(&year) {
        year += 1900;
    }

    let year = i32::try_from(year).ok()?;
    let first_of_year = NaiveDate::from_ymd_opt(year, 1, 1)?;

    let with_months = if month >= 0 {
        first_of_year.checked_add_months(Months::new(u32::try_from(month).ok()?))?
    } else {
        first_of_year.checked_sub_months(Months::new(u32::try_from(-month).ok()?))?
    };

    with_months.checked_add_signed(Duration::try_days(day - 1)?)
}

/// Reads the integer prefix of `text` the way `parseInt(text, 10)` does.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
