//! # Display Formatting
//!
//! Date, currency, and quantity formatting helpers shared by receipts and
//! list screens. All timestamps from the backend are UTC; receipts render
//! them as-is (the business runs in a single timezone).
//!
//! These are presentation helpers only; nothing here feeds back into cart
//! math, which stays in exact decimals.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;

// =============================================================================
// Dates and Times
// =============================================================================

/// "January 5, 2025 3:07 PM", the long receipt header format.
pub fn format_transaction_date(date: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        format_transaction_date_only(date),
        format_transaction_time(date)
    )
}

/// "January 5, 2025", date portion only.
pub fn format_transaction_date_only(date: DateTime<Utc>) -> String {
    format!("{} {}, {}", date.format("%B"), date.day(), date.year())
}

/// "3:07 PM", 12-hour clock, no leading zero on the hour.
pub fn format_transaction_time(date: DateTime<Utc>) -> String {
    let (is_pm, hour) = date.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        date.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// "01/05/2025 3:07 PM", compact list rows.
pub fn format_short_date_time(date: DateTime<Utc>) -> String {
    format!(
        "{:02}/{:02}/{} {}",
        date.month(),
        date.day(),
        date.year(),
        format_transaction_time(date)
    )
}

/// "01/05/2025", for report range pickers.
pub fn format_mmddyyyy_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.month(), date.day(), date.year())
}

// =============================================================================
// Money and Quantities
// =============================================================================

/// Plain two-decimal rendering, e.g. "12.50".
pub fn format_price(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Peso rendering with thousands separators, e.g. "₱1,234.56".
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let raw = format!("{:.2}", rounded.abs());
    // raw is always "<digits>.<2 digits>" here
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₱{}.{}", sign, grouped, frac_part)
}

/// Quantity rendering: whole number for unit-sale items, two decimals for
/// fractional-measure items. The cart stores the raw decimal either way.
pub fn format_quantity(quantity: Decimal, sell_by_unit: bool) -> String {
    if sell_by_unit {
        format!("{}", quantity.round())
    } else {
        format!("{:.2}", quantity.round_dp(2))
    }
}

// =============================================================================
// Names
// =============================================================================

/// "maria CRUZ" → "Maria cruz".
pub fn capitalize_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Truncates a display name to 20 characters with an ellipsis.
pub fn truncate_name(name: &str) -> String {
    truncate_to(name, 20)
}

/// Truncates a display name to 6 characters for narrow columns.
pub fn truncate_short_name(name: &str) -> String {
    truncate_to(name, 6)
}

fn truncate_to(name: &str, max_len: usize) -> String {
    if name.chars().count() > max_len {
        let truncated: String = name.chars().take(max_len).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn transaction_date_formats() {
        let date = ts(2025, 1, 5, 15, 7);
        assert_eq!(format_transaction_date(date), "January 5, 2025 3:07 PM");
        assert_eq!(format_transaction_date_only(date), "January 5, 2025");
        assert_eq!(format_transaction_time(date), "3:07 PM");
        assert_eq!(format_short_date_time(date), "01/05/2025 3:07 PM");
    }

    #[test]
    fn midnight_and_noon_render_twelve() {
        assert_eq!(format_transaction_time(ts(2025, 6, 1, 0, 5)), "12:05 AM");
        assert_eq!(format_transaction_time(ts(2025, 6, 1, 12, 0)), "12:00 PM");
    }

    #[test]
    fn mmddyyyy_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(format_mmddyyyy_date(date), "03/09/2025");
    }

    #[test]
    fn price_rounds_to_two_decimals() {
        assert_eq!(format_price(dec!(12.5)), "12.50");
        assert_eq!(format_price(dec!(0.125)), "0.13");
        assert_eq!(format_price(Decimal::ZERO), "0.00");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.5)), "₱1,234,567.50");
        assert_eq!(format_currency(dec!(999)), "₱999.00");
        assert_eq!(format_currency(dec!(-1500)), "-₱1,500.00");
    }

    #[test]
    fn quantity_respects_sell_by_unit() {
        assert_eq!(format_quantity(dec!(3.0), true), "3");
        assert_eq!(format_quantity(dec!(1.25), false), "1.25");
        assert_eq!(format_quantity(dec!(1.5), false), "1.50");
    }

    #[test]
    fn capitalization_and_truncation() {
        assert_eq!(capitalize_first_letter("maria CRUZ"), "Maria cruz");
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(truncate_name("Short"), "Short");
        assert_eq!(
            truncate_name("A very long product description"),
            "A very long product ..."
        );
        assert_eq!(truncate_short_name("Branch One"), "Branch...");
    }
}
