// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV import/export of transactions and the JSON backup document.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Budget, NewTransaction, RecurringTemplate, Transaction};
use crate::registry::{Category, Currency};
use crate::utils::{parse_date, parse_decimal};

pub const CSV_HEADERS: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// Rows accepted from an import plus the number of rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub transactions: Vec<NewTransaction>,
    pub skipped: usize,
}

/// Read `date, description, category, amount` rows. The first line is a
/// header. Each line is parsed on its own, so a malformed row (an unclosed
/// quote included) is skipped and counted without touching the rows after it.
pub fn read_transactions_csv<R: Read>(mut reader: R) -> ImportBatch {
    let mut raw = Vec::new();
    if let Err(err) = reader.read_to_end(&mut raw) {
        tracing::warn!(error = %err, "CSV source ended early");
    }
    let text = String::from_utf8_lossy(&raw);

    let mut batch = ImportBatch::default();
    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line).and_then(|rec| transaction_from_record(&rec)) {
            Ok(tx) => batch.transactions.push(tx),
            Err(err) => {
                tracing::warn!(row = idx + 1, error = %err, "skipping CSV row");
                batch.skipped += 1;
            }
        }
    }
    tracing::debug!(
        accepted = batch.transactions.len(),
        skipped = batch.skipped,
        "parsed transaction CSV"
    );
    batch
}

fn parse_line(line: &str) -> Result<StringRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut rec = StringRecord::new();
    if !rdr.read_record(&mut rec)? {
        return Err(Error::InvalidData("empty row".into()));
    }
    // A stray carriage return splits the line into two records.
    if rdr.read_record(&mut StringRecord::new())? {
        return Err(Error::InvalidData("row spans several records".into()));
    }
    Ok(rec)
}

fn transaction_from_record(rec: &StringRecord) -> Result<NewTransaction> {
    if rec.len() < 4 {
        return Err(Error::InvalidData(format!(
            "expected 4 fields, found {}",
            rec.len()
        )));
    }
    let field = |i: usize| rec.get(i).unwrap_or("");
    let date = parse_date(field(0))?;
    let category: Category = field(2).parse()?;
    let amount = parse_decimal(field(3))?;
    let tx = NewTransaction::new(amount, field(1), category, date);
    tx.validate()?;
    Ok(tx)
}

/// Write transactions as CSV, oldest first, amounts with two decimals.
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for t in sorted {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            t.category.to_string(),
            format_amount(t.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn transactions_to_csv_string(transactions: &[Transaction]) -> Result<String> {
    let mut buf = Vec::new();
    write_transactions_csv(transactions, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidData(e.to_string()))
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Full export of a ledger. Carries no schema version.
#[derive(Debug, Clone, Serialize)]
pub struct Backup<'a> {
    pub exported: DateTime<Utc>,
    pub expenses: &'a [Transaction],
    pub budgets: &'a [Budget],
    pub recurring: &'a [RecurringTemplate],
    pub currency: Currency,
}

impl<'a> Backup<'a> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
