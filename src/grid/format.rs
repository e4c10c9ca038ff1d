//! Display formatting for cell values
//!
//! Rendering never fails: any value that cannot be formatted as requested is
//! shown as its raw text.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::columns::CellFormat;
use super::numeric::{looks_numeric, to_number};
use crate::config::LocaleConfig;

/// Decimal places beyond this are ignored
pub const MAX_PRECISION: u32 = 10;

const DATE_INPUTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_INPUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Render a raw cell value for display
pub fn render(raw: &str, format: CellFormat, precision: u32, locale: &LocaleConfig) -> String {
    match format {
        CellFormat::Text => raw.to_string(),
        CellFormat::Date => format_date(raw, locale).unwrap_or_else(|| raw.to_string()),
        _ if raw.trim().is_empty() || !looks_numeric(raw) => raw.to_string(),
        CellFormat::Number => format_grouped(to_number(raw), precision, locale),
        CellFormat::Percent => format!(
            "{}{}",
            format_grouped(to_number(raw), precision, locale),
            locale.percent_suffix
        ),
        CellFormat::Currency => format_currency(to_number(raw), precision, locale),
        CellFormat::Time => format!("{}{}", raw.trim(), locale.hour_suffix),
    }
}

/// Fixed-precision number with locale grouping, e.g. `1.234,50`
pub fn format_grouped(value: f64, precision: u32, locale: &LocaleConfig) -> String {
    let (negative, body) = grouped_parts(value, precision, locale);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Currency with the locale symbol, e.g. `R$ 1.234,56` / `-R$ 10,00`
pub fn format_currency(value: f64, precision: u32, locale: &LocaleConfig) -> String {
    let (negative, body) = grouped_parts(value, precision, locale);
    let sign = if negative { "-" } else { "" };
    if locale.currency_symbol.is_empty() {
        format!("{}{}", sign, body)
    } else {
        format!("{}{} {}", sign, locale.currency_symbol, body)
    }
}

/// Sign flag and unsigned grouped digits
///
/// A value that rounds to zero carries no sign.
fn grouped_parts(value: f64, precision: u32, locale: &LocaleConfig) -> (bool, String) {
    if !value.is_finite() {
        return (false, "0".to_string());
    }

    let decimals = precision.min(MAX_PRECISION) as usize;
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (int_part, dec_part) = match formatted.split_once('.') {
        Some((int_part, dec_part)) => (int_part, Some(dec_part)),
        None => (formatted.as_str(), None),
    };

    let mut with_sep = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_sep.push(locale.group_separator);
        }
        with_sep.push(c);
    }
    let mut body: String = with_sep.chars().rev().collect();

    if let Some(dec) = dec_part {
        body.push(locale.decimal_separator);
        body.push_str(dec);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    (value < 0.0 && !is_zero, body)
}

/// Parse common date spellings and render with the locale date format
fn format_date(raw: &str, locale: &LocaleConfig) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date = DATE_INPUTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_INPUTS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })?;

    let mut out = String::new();
    if write!(out, "{}", date.format(&locale.date_format)).is_err() {
        tracing::debug!("Invalid date format {:?}", locale.date_format);
        return None;
    }
    Some(out)
}
