//! Utility functions

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CURRENCY_CODE;

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.chars().count() <= 2 { 1 } else { 2 };
        let prefix: String = local.chars().take(keep).collect();
        format!("{}***{}", prefix, domain)
    } else {
        "***".to_string()
    }
}

/// `PHP 1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    format!("{} {}", CURRENCY_CODE, group_thousands(amount))
}

/// `PHP 1234.50`, used where a thousands separator would collide with a delimiter.
pub fn format_currency_plain(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{} {:.2}", CURRENCY_CODE, rounded)
}

fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// `Jan 05, 2024`. Anything that is not RFC 3339 is returned unchanged.
pub fn format_date(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.format("%b %d, %Y").to_string()))
        .unwrap_or_else(|_| value.to_string())
}

/// Bootstrap badge class for a status label.
pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "pending" | "unpaid" => "bg-warning",
        "verified" | "paid" | "completed" | "active" => "bg-success",
        "rejected" | "overdue" | "failed" => "bg-danger",
        _ => "bg-secondary",
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(phone))
}
