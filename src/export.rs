//! Delimited-text export of the derived view.
//!
//! Only what the user currently sees is exported, in display order. An empty
//! view produces no output at all.

use crate::engine::DerivedView;
use crate::error::{HistoryError, Result};
use crate::transaction::TransactionRecord;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column names of the export header row.
pub const EXPORT_HEADER: [&str; 7] = [
    "Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Balance",
    "Status",
];

/// Settings for the exported file.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Field delimiter.
    pub delimiter: u8,

    /// Row terminator.
    pub terminator: Terminator,

    /// Leading part of the file name; the export date and `.csv` follow.
    pub file_prefix: String,

    /// `chrono` format string for the Date column.
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            delimiter: b',',
            terminator: Terminator::Any(b'\n'),
            file_prefix: "easybank-transactions".to_string(),
            date_format: "%b %-d, %Y".to_string(),
        }
    }
}

impl ExportConfig {
    /// Accepts `delimiter` if fully quoted fields stay separable with it.
    ///
    /// The quote character, line breaks and non-ASCII bytes are rejected.
    pub fn check_delimiter(delimiter: u8) -> Result<u8> {
        match delimiter {
            b'"' | b'\n' | b'\r' => Err(HistoryError::InvalidExportConfig(format!(
                "delimiter {:?} clashes with quoting or row breaks",
                delimiter as char
            ))),
            d if !d.is_ascii() => Err(HistoryError::InvalidExportConfig(format!(
                "delimiter byte {:#04x} is not ASCII",
                d
            ))),
            d => Ok(d),
        }
    }

    /// Checks that output written with these settings parses back.
    pub fn validate(&self) -> Result<()> {
        Self::check_delimiter(self.delimiter)?;

        if let Terminator::Any(byte) = self.terminator {
            if byte == b'"' || byte == self.delimiter || !byte.is_ascii() {
                return Err(HistoryError::InvalidExportConfig(format!(
                    "terminator {:?} clashes with quoting or the delimiter",
                    byte as char
                )));
            }
        }
        Ok(())
    }
}

/// Writes derived views as fully quoted delimited text.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: ExportConfig,
}

impl CsvExporter {
    pub fn new(config: ExportConfig) -> Self {
        CsvExporter { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// File name for an export made on `today`, e.g.
    /// `easybank-transactions-2024-12-18.csv`.
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("{}-{}.csv", self.config.file_prefix, today.format("%Y-%m-%d"))
    }

    /// Formats one record as export fields.
    pub fn row(&self, record: &TransactionRecord) -> [String; 7] {
        [
            record.date().format(&self.config.date_format).to_string(),
            record.description().to_string(),
            record.category().to_string(),
            record.direction().to_string(),
            record.amount().to_string(),
            record.balance().to_string(),
            record.status().to_string(),
        ]
    }

    /// Writes the header and one row per visible record.
    ///
    /// Returns the number of data rows written. Fails with
    /// [`HistoryError::NothingToExport`] before touching `writer` when the
    /// view is empty, and with [`HistoryError::InvalidExportConfig`] when the
    /// settings fail [`ExportConfig::validate`].
    pub fn write_to<W: Write>(&self, view: &DerivedView<'_>, writer: W) -> Result<usize> {
        if view.is_empty() {
            return Err(HistoryError::NothingToExport);
        }
        self.config.validate()?;

        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .terminator(self.config.terminator)
            .quote_style(QuoteStyle::Always)
            .from_writer(writer);

        csv_writer.write_record(EXPORT_HEADER)?;

        for record in view.iter() {
            csv_writer.write_record(self.row(record))?;
        }

        csv_writer.flush()?;
        Ok(view.len())
    }

    /// Renders the export as a string, or `None` for an empty view.
    pub fn render(&self, view: &DerivedView<'_>) -> Result<Option<String>> {
        if view.is_empty() {
            return Ok(None);
        }

        let mut buffer = Vec::new();
        self.write_to(view, &mut buffer)?;
        // csv only writes the UTF-8 text it was given
        Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
    }

    /// Writes the export into `dir` under [`CsvExporter::file_name`].
    ///
    /// Returns the created path, or `None` without creating a file when the
    /// view is empty.
    pub fn export_to_dir<P: AsRef<Path>>(
        &self,
        view: &DerivedView<'_>,
        dir: P,
        today: NaiveDate,
    ) -> Result<Option<PathBuf>> {
        if view.is_empty() {
            return Ok(None);
        }
        self.config.validate()?;

        let path = dir.as_ref().join(self.file_name(today));
        let file = File::create(&path)?;
        let rows = self.write_to(view, file)?;

        info!("Exported {} transactions to {}", rows, path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaUpdate;
    use crate::engine::QueryEngine;
    use crate::money::Money;
    use crate::source::StaticSource;
    use crate::transaction::{Direction, Status};
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> StaticSource {
        StaticSource::new(vec![
            TransactionRecord::new(
                "1",
                date(2024, 12, 18),
                "Direct Deposit - Salary",
                Money::from_str("3500").unwrap(),
                Direction::Credit,
                "Income",
                Money::from_str("5420.5").unwrap(),
                Status::Completed,
            )
            .unwrap(),
            TransactionRecord::new(
                "11",
                date(2024, 12, 8),
                "Coffee \"Bean\" Shop",
                Money::from_str("5.75").unwrap(),
                Direction::Debit,
                "Dining",
                Money::from_str("2240.53").unwrap(),
                Status::Pending,
            )
            .unwrap(),
        ])
    }

    #[test]
    fn test_export_format() {
        let engine = QueryEngine::new(source());
        let output = CsvExporter::default()
            .render(&engine.view())
            .unwrap()
            .unwrap();

        let expected = concat!(
            "\"Date\",\"Description\",\"Category\",\"Type\",\"Amount\",\"Balance\",\"Status\"\n",
            "\"Dec 18, 2024\",\"Direct Deposit - Salary\",\"Income\",\"credit\",\"3500.00\",\"5420.50\",\"completed\"\n",
            "\"Dec 8, 2024\",\"Coffee \"\"Bean\"\" Shop\",\"Dining\",\"debit\",\"5.75\",\"2240.53\",\"pending\"\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_export_follows_view_order_and_filter() {
        let mut engine = QueryEngine::new(source());
        engine.apply(CriteriaUpdate::Direction(Some(Direction::Debit)));

        let output = CsvExporter::default()
            .render(&engine.view())
            .unwrap()
            .unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(!output.contains("Salary"));
    }

    #[test]
    fn test_custom_delimiter_and_terminator() {
        let engine = QueryEngine::new(source());
        let exporter = CsvExporter::new(ExportConfig {
            delimiter: b';',
            terminator: Terminator::CRLF,
            ..ExportConfig::default()
        });

        let output = exporter.render(&engine.view()).unwrap().unwrap();
        assert!(output.starts_with("\"Date\";\"Description\";"));
        assert!(output.ends_with("\"pending\"\r\n"));
    }

    #[test]
    fn test_empty_view_writes_nothing() {
        let mut engine = QueryEngine::new(source());
        engine.apply(CriteriaUpdate::Status(Some(Status::Failed)));
        let view = engine.view();
        let exporter = CsvExporter::default();

        let mut buffer = Vec::new();
        assert!(matches!(
            exporter.write_to(&view, &mut buffer),
            Err(HistoryError::NothingToExport)
        ));
        assert!(buffer.is_empty());
        assert!(exporter.render(&view).unwrap().is_none());
    }

    #[test]
    fn test_quote_delimiter_is_refused() {
        let engine = QueryEngine::new(source());
        let exporter = CsvExporter::new(ExportConfig {
            delimiter: b'"',
            ..ExportConfig::default()
        });

        let mut buffer = Vec::new();
        assert!(matches!(
            exporter.write_to(&engine.view(), &mut buffer),
            Err(HistoryError::InvalidExportConfig(_))
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_check_delimiter() {
        assert_eq!(ExportConfig::check_delimiter(b';').unwrap(), b';');
        assert_eq!(ExportConfig::check_delimiter(b'\t').unwrap(), b'\t');
        for byte in [b'"', b'\n', b'\r', 0xE9] {
            assert!(ExportConfig::check_delimiter(byte).is_err());
        }
    }

    #[test]
    fn test_terminator_must_differ_from_delimiter() {
        let config = ExportConfig {
            delimiter: b';',
            terminator: Terminator::Any(b';'),
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ExportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_creates_no_file() {
        let engine = QueryEngine::new(source());
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(ExportConfig {
            delimiter: b'\n',
            ..ExportConfig::default()
        });

        assert!(exporter
            .export_to_dir(&engine.view(), dir.path(), date(2024, 12, 18))
            .is_err());
        assert!(!dir.path().join(exporter.file_name(date(2024, 12, 18))).exists());
    }

    #[test]
    fn test_file_name_uses_export_date() {
        let exporter = CsvExporter::default();
        assert_eq!(
            exporter.file_name(date(2024, 12, 18)),
            "easybank-transactions-2024-12-18.csv"
        );
    }
}
