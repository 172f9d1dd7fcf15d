//! # Transaction History
//!
//! Filters, sorts and exports an account's transaction history.
//!
//! ## Design Principles
//!
//! - **Injected data**: records come from a [`TransactionSource`], never a global
//! - **Recomputed views**: every view is derived from the full source and the
//!   current criteria; nothing is cached
//! - **Stable ordering**: sorted by date only, same-day transactions keep source order
//! - **Exact amounts**: `rust_decimal` values, rendered with 2 decimal places
//! - **Export what you see**: only the derived view is exported, never an empty one
//!
//! ## Example
//!
//! ```no_run
//! use transaction_history::{CriteriaUpdate, CsvExporter, CsvSource, Direction, QueryEngine};
//!
//! let source = CsvSource::open("transactions.csv").unwrap();
//! let mut engine = QueryEngine::new(source);
//! engine.apply(CriteriaUpdate::Direction(Some(Direction::Debit)));
//!
//! let view = engine.view();
//! eprintln!("{}", view);
//! CsvExporter::default().write_to(&view, std::io::stdout()).unwrap();
//! ```

pub mod criteria;
pub mod engine;
pub mod error;
pub mod export;
pub mod money;
pub mod payment;
pub mod source;
pub mod transaction;

pub use criteria::{
    compare_by_date, ActiveFilter, CriteriaField, CriteriaUpdate, FilterCriteria, SortOrder,
};
pub use engine::{category_index, DerivedView, QueryEngine};
pub use error::{HistoryError, Result};
pub use export::{CsvExporter, ExportConfig, EXPORT_HEADER};
pub use money::Money;
pub use payment::{EndCondition, Frequency, PaymentOutcome};
pub use source::{CsvSource, StaticSource, TransactionSource};
pub use transaction::{Direction, RawTransaction, Status, TransactionRecord};
