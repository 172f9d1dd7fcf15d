//! Data sources that supply the engine with its transaction collection.
//!
//! The engine never fetches, paginates or streams; a source hands over the
//! whole ordered collection and the engine borrows it.

use crate::error::{HistoryError, Result};
use crate::transaction::{RawTransaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Supplies an ordered, immutable collection of transactions.
pub trait TransactionSource {
    /// All transactions, in source order.
    fn records(&self) -> &[TransactionRecord];
}

/// A fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<TransactionRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        StaticSource { records }
    }
}

impl From<Vec<TransactionRecord>> for StaticSource {
    fn from(records: Vec<TransactionRecord>) -> Self {
        StaticSource::new(records)
    }
}

impl TransactionSource for StaticSource {
    fn records(&self) -> &[TransactionRecord] {
        &self.records
    }
}

impl<T: TransactionSource + ?Sized> TransactionSource for &T {
    fn records(&self) -> &[TransactionRecord] {
        (**self).records()
    }
}

/// Transactions loaded once from CSV with the columns
/// `id,date,description,amount,type,category,balance,status`.
///
/// Invalid rows and rows repeating an already loaded id are logged at warn
/// level and skipped, so one bad line does not hide the rest of the history.
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    records: Vec<TransactionRecord>,
    skipped: usize,
}

impl CsvSource {
    /// Opens and loads a CSV file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Loading transactions from {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    /// Loads transactions from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        // A header that cannot be read means the input is not CSV at all.
        csv_reader.headers()?;

        let mut source = CsvSource::default();
        let mut seen = HashSet::new();

        for (row_idx, result) in csv_reader.deserialize::<RawTransaction>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(raw) => raw.parse(row_num),
                Err(e) => Err(HistoryError::Csv(e)),
            };

            match record {
                Ok(record) => {
                    if seen.insert(record.id().to_string()) {
                        source.records.push(record);
                    } else {
                        let e = HistoryError::DuplicateId {
                            id: record.id().to_string(),
                            row: row_num,
                        };
                        warn!("{}, ignoring", e);
                        source.skipped += 1;
                    }
                }
                Err(e) => {
                    warn!("Row {}: {}", row_num, e);
                    source.skipped += 1;
                }
            }
        }

        debug!(
            "Loaded {} transactions, skipped {} rows",
            source.records.len(),
            source.skipped
        );

        Ok(source)
    }

    /// Number of rows that were rejected while loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl TransactionSource for CsvSource {
    fn records(&self) -> &[TransactionRecord] {
        &self.records
    }
}
