//! Transaction models for CSV loading and the immutable record the engine queries.

use crate::error::{HistoryError, Result};
use crate::money::Money;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Whether a transaction increases or decreases the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }

    /// Sign shown in front of an amount moving in this direction.
    pub fn sign(&self) -> char {
        match self {
            Direction::Credit => '+',
            Direction::Debit => '-',
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Direction::Credit),
            "debit" => Ok(Direction::Debit),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Completed,
    Pending,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::Pending => "pending",
            Status::Failed => "failed",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Status::Completed),
            "pending" => Ok(Status::Pending),
            "failed" => Ok(Status::Failed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of an account's transaction history.
///
/// # Invariants
///
/// - `amount` is a non-negative magnitude; the sign lives in `direction`
/// - `balance` is an informational snapshot and is never recomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    id: String,
    date: NaiveDate,
    description: String,
    amount: Money,
    direction: Direction,
    category: String,
    balance: Money,
    status: Status,
}

impl TransactionRecord {
    /// Creates a record, rejecting negative amounts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        direction: Direction,
        category: impl Into<String>,
        balance: Money,
        status: Status,
    ) -> Result<Self> {
        let id = id.into();
        if amount.is_negative() {
            return Err(HistoryError::NegativeAmount { id, amount });
        }

        Ok(TransactionRecord {
            id,
            date,
            description: description.into(),
            amount,
            direction,
            category: category.into(),
            balance,
            status,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unsigned magnitude of the transaction.
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Account balance recorded alongside the transaction.
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Amount as shown in a history list, e.g. `+$3,500.00` or `-$127.85`.
    pub fn signed_amount(&self) -> String {
        format!("{}{}", self.direction.sign(), self.amount.to_currency_string())
    }
}

/// Raw transaction row as read from CSV.
///
/// Type and status stay textual so an unknown value is reported against its
/// row instead of failing the whole row deserialization.
#[derive(Debug, Deserialize)]
pub struct RawTransaction {
    pub id: String,

    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,

    pub description: String,

    pub amount: Money,

    /// `credit` or `debit`
    #[serde(rename = "type")]
    pub tx_type: String,

    pub category: String,

    pub balance: Money,

    /// `completed`, `pending` or `failed`
    pub status: String,
}

impl RawTransaction {
    /// Converts the raw row into a validated record.
    ///
    /// `row` is the 1-indexed CSV line, used for error reporting.
    pub fn parse(self, row: usize) -> Result<TransactionRecord> {
        let invalid = |message: String| HistoryError::InvalidRecord { row, message };

        if self.id.trim().is_empty() {
            return Err(invalid("missing transaction id".to_string()));
        }

        let direction = Direction::from_str(&self.tx_type).map_err(invalid)?;
        let status = Status::from_str(&self.status).map_err(invalid)?;

        TransactionRecord::new(
            self.id,
            self.date,
            self.description,
            self.amount,
            direction,
            self.category,
            self.balance,
            status,
        )
        .map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tx_type: &str, amount: &str, status: &str) -> RawTransaction {
        RawTransaction {
            id: "2".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 17).unwrap(),
            description: "Grocery Store Purchase".to_string(),
            amount: Money::from_str(amount).unwrap(),
            tx_type: tx_type.to_string(),
            category: "Groceries".to_string(),
            balance: Money::from_str("1920.50").unwrap(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_parse_debit() {
        let record = raw("debit", "127.85", "completed").parse(3).unwrap();
        assert_eq!(record.id(), "2");
        assert_eq!(record.direction(), Direction::Debit);
        assert_eq!(record.status(), Status::Completed);
        assert_eq!(record.amount().to_string(), "127.85");
        assert_eq!(record.balance().to_string(), "1920.50");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let record = raw("  Credit ", "10", "PENDING").parse(2).unwrap();
        assert_eq!(record.direction(), Direction::Credit);
        assert_eq!(record.status(), Status::Pending);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        match raw("refund", "10", "completed").parse(7) {
            Err(HistoryError::InvalidRecord { row, message }) => {
                assert_eq!(row, 7);
                assert!(message.contains("refund"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(matches!(
            raw("debit", "10", "settled").parse(2),
            Err(HistoryError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_negative_amount_with_row() {
        match raw("debit", "-10", "completed").parse(5) {
            Err(HistoryError::InvalidRecord { row, .. }) => assert_eq!(row, 5),
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_negative_amount() {
        let result = TransactionRecord::new(
            "9",
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            "Reversal",
            Money::from_str("-1.00").unwrap(),
            Direction::Credit,
            "Refund",
            Money::ZERO,
            Status::Completed,
        );
        assert!(matches!(result, Err(HistoryError::NegativeAmount { .. })));
    }

    #[test]
    fn test_negative_balance_is_allowed() {
        let mut row = raw("debit", "10", "completed");
        row.balance = Money::from_str("-25.00").unwrap();
        assert!(row.parse(2).unwrap().balance().is_negative());
    }

    #[test]
    fn test_signed_amount_uses_direction() {
        let debit = raw("debit", "127.85", "completed").parse(2).unwrap();
        assert_eq!(debit.signed_amount(), "-$127.85");

        let credit = raw("credit", "3500", "completed").parse(2).unwrap();
        assert_eq!(credit.signed_amount(), "+$3,500.00");
    }
}
