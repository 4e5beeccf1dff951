//! Display formatting for amounts, dates, months and categories.
//!
//! Everything here is a pure function of its inputs. Amounts are formatted
//! unsigned; callers convey direction with [`signed_amount`] or their own
//! markup.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, MonthKey, TransactionKind};

const FRACTION_DIGITS: u32 = 2;
const DEFAULT_ICON: &str = "tag";

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
    pub currency_display: CurrencyDisplay,
    pub symbol_position: SymbolPosition,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            date_format: DateFormatStyle::Medium,
            currency_display: CurrencyDisplay::Symbol,
            symbol_position: SymbolPosition::Prefix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormatStyle {
    /// `2024-03-05`
    Short,
    /// `Mar 5, 2024`
    Medium,
    /// `Tuesday, March 5, 2024`
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Formats unsigned amounts in one currency for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    locale: LocaleConfig,
    code: String,
}

impl CurrencyFormatter {
    pub fn new(locale: LocaleConfig, code: impl Into<String>) -> Self {
        Self {
            locale,
            code: code.into().to_uppercase(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Absolute value with exactly two fractional digits and the currency marker.
    pub fn format(&self, amount: Decimal) -> String {
        let body = format_number(&self.locale, amount.abs());
        let marker = match self.locale.currency_display {
            CurrencyDisplay::Symbol => symbol_for(&self.code).to_string(),
            CurrencyDisplay::Code => self.code.clone(),
        };
        let spaced = self.locale.currency_display == CurrencyDisplay::Code
            || marker.chars().all(|c| c.is_ascii_alphabetic());
        match (self.locale.symbol_position, spaced) {
            (SymbolPosition::Prefix, false) => format!("{marker}{body}"),
            (SymbolPosition::Prefix, true) => format!("{marker} {body}"),
            (SymbolPosition::Suffix, _) => format!("{body} {marker}"),
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(LocaleConfig::default(), "USD")
    }
}

/// Formats `amount` with the default locale and currency (`$1,234.50`).
pub fn format_currency(amount: Decimal) -> String {
    CurrencyFormatter::default().format(amount)
}

/// Prefixes the formatted amount with `+` for income and `-` for expenses.
pub fn signed_amount(
    formatter: &CurrencyFormatter,
    kind: TransactionKind,
    amount: Decimal,
) -> String {
    let sign = match kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!("{sign}{}", formatter.format(amount))
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "AUD" => "A$",
        _ => code,
    }
}

/// Rounds half away from zero to two places and applies the locale separators.
pub fn format_number(locale: &LocaleConfig, value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(FRACTION_DIGITS);
    let raw = rounded.to_string();
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!(
        "{sign}{}{}{fraction}",
        group_digits(int_part, locale.grouping_separator),
        locale.decimal_separator
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{} {}, {}",
            short_month_label(date.month()),
            date.day(),
            date.year()
        ),
        DateFormatStyle::Long => format!(
            "{}, {} {}, {}",
            weekday_label(date.weekday()),
            month_label(date.month()),
            date.day(),
            date.year()
        ),
    }
}

/// Display label for a month key, e.g. `March 2024`.
pub fn format_month_label(month: MonthKey) -> String {
    format!("{} {}", month_label(month.month()), month.year())
}

/// Icon name for a category; unrecognized categories get a generic tag.
pub fn category_icon(category: &Category) -> &'static str {
    match category {
        Category::Food => "utensils",
        Category::Travel => "plane",
        Category::Rent => "house",
        Category::Shopping => "bag-shopping",
        Category::Salary => "money-bill-wave",
        Category::Other => "ellipsis",
        Category::Unrecognized(_) => DEFAULT_ICON,
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

fn short_month_label(month: u32) -> &'static str {
    let full = month_label(month);
    full.get(..3).unwrap_or(full)
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
