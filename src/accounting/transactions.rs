use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use getset::{CopyGetters, Getters};
use log::debug;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use super::{FieldError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FieldError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Transaction {
    #[getset(get_copy = "pub")]
    id: i64,
    #[getset(get_copy = "pub")]
    amount: Decimal,
    #[getset(get_copy = "pub")]
    date: DateTime<Utc>,
    #[getset(get = "pub")]
    category: String,
    #[getset(get_copy = "pub")]
    type_: TransactionType,
}

impl Transaction {
    pub fn new(
        id: i64,
        amount: Decimal,
        date: DateTime<Utc>,
        category: impl Into<String>,
        type_: TransactionType,
    ) -> Result<Transaction, FieldError> {
        if amount < Decimal::ZERO {
            return Err(FieldError::NegativeAmount);
        }

        let category = category.into();
        if category.is_empty() {
            return Err(FieldError::EmptyCategory);
        }

        Ok(Transaction {
            id,
            amount,
            date,
            category,
            type_,
        })
    }

    pub fn is_income(&self) -> bool {
        self.type_ == TransactionType::Income
    }
}

impl TryFrom<&Value> for Transaction {
    type Error = FieldError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let record = value.as_object().ok_or(FieldError::NotAnObject)?;

        let id = field(record, "id")?.as_i64().ok_or(FieldError::InvalidId)?;
        let amount = match field(record, "amount")? {
            Value::Number(number) => parse_amount(number)?,
            _ => return Err(FieldError::InvalidAmount),
        };
        let date = parse_date(field(record, "date")?).ok_or(FieldError::InvalidDate)?;
        let category = field(record, "category")?
            .as_str()
            .ok_or(FieldError::InvalidCategory)?;
        let type_ = match field(record, "type")? {
            Value::String(tag) => tag.parse()?,
            other => return Err(FieldError::UnknownType(other.to_string())),
        };

        Transaction::new(id, amount, date, category, type_)
    }
}

fn field<'a>(record: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, FieldError> {
    record.get(name).ok_or(FieldError::MissingField(name))
}

/// JSON numbers go through their textual form so `0.1` stays exactly `0.1`.
/// Anything finer than 28 decimal places is rounded.
fn parse_amount(number: &Number) -> Result<Decimal, FieldError> {
    let repr = number.to_string();
    if let Ok(amount) = Decimal::from_str(&repr).or_else(|_| Decimal::from_scientific(&repr)) {
        return Ok(amount);
    }

    let value = number.as_f64().ok_or(FieldError::InvalidAmount)?;
    match Decimal::from_f64(value) {
        Some(amount) => Ok(amount),
        None if value.abs() < 1.0 => Ok(Decimal::ZERO),
        None => Err(FieldError::AmountOutOfRange),
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, offset-less ISO date-times and plain `YYYY-MM-DD` (both
/// read as UTC), or an integer count of milliseconds since the Unix epoch.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_transaction(value: &Value) -> bool {
    Transaction::try_from(value).is_ok()
}

/// Validates every element; the first failing element rejects the whole input.
/// The per-type totals must fit in a `Decimal` so later aggregation cannot overflow.
pub fn parse(input: &Value) -> Result<Vec<Transaction>, ValidationError> {
    let elements = input.as_array().ok_or(ValidationError::NotAnArray)?;

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut transactions = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let invalid = |reason: FieldError| {
            debug!("invalid transaction, index={}, err={}", index, reason);
            ValidationError::InvalidElement { index, reason }
        };

        let transaction = Transaction::try_from(element).map_err(&invalid)?;
        let total = match transaction.type_() {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expenses,
        };
        *total = total
            .checked_add(transaction.amount())
            .ok_or_else(|| invalid(FieldError::AmountOutOfRange))?;

        transactions.push(transaction);
    }

    Ok(transactions)
}
