use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::accounting::analyzer::Analyzer;
use crate::accounting::transactions::{Transaction, TransactionType};

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Balance,
    Income,
    Expense,
    MostExpensive,
}

impl From<TransactionType> for Section {
    fn from(type_: TransactionType) -> Self {
        match type_ {
            TransactionType::Income => Section::Income,
            TransactionType::Expense => Section::Expense,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ReportRecord {
    pub section: Section,
    pub category: Option<String>,
    pub id: Option<i64>,
    pub amount: Decimal,
}

impl From<&Transaction> for ReportRecord {
    fn from(transaction: &Transaction) -> Self {
        ReportRecord {
            section: Section::MostExpensive,
            category: Some(transaction.category().clone()),
            id: Some(transaction.id()),
            amount: transaction.amount(),
        }
    }
}

/// Reads and decodes the file without looking at its shape.
pub fn load_json(file_path: impl AsRef<Path>) -> Result<Value> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path).with_context(|| format!("failed to open {}", file_path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", file_path.display()))?;

    debug!("loaded input, path={}", file_path.display());

    Ok(value)
}

pub fn report_records(analyzer: &Analyzer) -> Vec<ReportRecord> {
    let mut records = vec![ReportRecord {
        section: Section::Balance,
        category: None,
        id: None,
        amount: analyzer.total_balance(),
    }];

    for type_ in [TransactionType::Income, TransactionType::Expense] {
        for (category, amount) in analyzer.category_breakdown(type_) {
            records.push(ReportRecord {
                section: type_.into(),
                category: Some(category),
                id: None,
                amount,
            });
        }
    }

    if let Some(transaction) = analyzer.most_expensive_transaction() {
        records.push(transaction.into());
    }

    records
}

pub fn write_report<W: Write>(analyzer: &Analyzer, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for record in report_records(analyzer) {
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

pub fn export_csv(analyzer: &Analyzer) -> Result<()> {
    write_report(analyzer, std::io::stdout())
}
