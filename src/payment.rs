//! Outcome of a submitted bill payment.
//!
//! No money moves; this is the confirmation a front end shows after the
//! user schedules a payment.

use crate::money::Money;
use chrono::NaiveDate;
use std::fmt;

const DATE_FORMAT: &str = "%b %d, %Y";

/// How often a recurring payment repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Annually => "Annually",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When a recurring payment stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndCondition {
    #[default]
    Never,
    /// Last payment on or before this date.
    OnDate(NaiveDate),
    /// Stops after this many payments.
    After(u32),
}

impl fmt::Display for EndCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndCondition::Never => f.write_str("Never ends"),
            EndCondition::OnDate(date) => write!(f, "Until {}", date.format(DATE_FORMAT)),
            EndCondition::After(count) => write!(f, "{} payments", count),
        }
    }
}

/// Confirmation of a scheduled payment, one variant per payment type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    OneTime {
        payee: String,
        account: String,
        amount: Money,
        date: NaiveDate,
        memo: String,
        confirmation: String,
    },
    Recurring {
        payee: String,
        account: String,
        amount: Money,
        first_date: NaiveDate,
        frequency: Frequency,
        end: EndCondition,
        memo: String,
        confirmation: String,
    },
}

impl PaymentOutcome {
    /// Confirms a one-time payment.
    ///
    /// `submitted_at_ms` is the submission time in Unix milliseconds and
    /// seeds the confirmation number. A blank memo becomes "Bill Payment".
    pub fn one_time(
        payee: impl Into<String>,
        account: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        memo: &str,
        submitted_at_ms: i64,
    ) -> Self {
        PaymentOutcome::OneTime {
            payee: payee.into(),
            account: account.into(),
            amount,
            date,
            memo: memo_or(memo, "Bill Payment"),
            confirmation: format!("PAY{}", submitted_at_ms),
        }
    }

    /// Confirms a recurring payment. A blank memo becomes
    /// "Recurring bill payment".
    #[allow(clippy::too_many_arguments)]
    pub fn recurring(
        payee: impl Into<String>,
        account: impl Into<String>,
        amount: Money,
        first_date: NaiveDate,
        frequency: Frequency,
        end: EndCondition,
        memo: &str,
        submitted_at_ms: i64,
    ) -> Self {
        PaymentOutcome::Recurring {
            payee: payee.into(),
            account: account.into(),
            amount,
            first_date,
            frequency,
            end,
            memo: memo_or(memo, "Recurring bill payment"),
            confirmation: format!("REC{}", submitted_at_ms),
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            PaymentOutcome::OneTime { .. } => "Payment Scheduled Successfully",
            PaymentOutcome::Recurring { .. } => "Recurring Payment Created",
        }
    }

    /// Label for the date line: "Payment Date" or "First Payment".
    pub fn date_label(&self) -> &'static str {
        match self {
            PaymentOutcome::OneTime { .. } => "Payment Date",
            PaymentOutcome::Recurring { .. } => "First Payment",
        }
    }

    pub fn payee(&self) -> &str {
        match self {
            PaymentOutcome::OneTime { payee, .. } | PaymentOutcome::Recurring { payee, .. } => payee,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            PaymentOutcome::OneTime { amount, .. } | PaymentOutcome::Recurring { amount, .. } => {
                *amount
            }
        }
    }

    pub fn confirmation(&self) -> &str {
        match self {
            PaymentOutcome::OneTime { confirmation, .. }
            | PaymentOutcome::Recurring { confirmation, .. } => confirmation,
        }
    }

    /// Date of the (first) payment, formatted for display.
    pub fn display_date(&self) -> String {
        let date = match self {
            PaymentOutcome::OneTime { date, .. } => date,
            PaymentOutcome::Recurring { first_date, .. } => first_date,
        };
        date.format(DATE_FORMAT).to_string()
    }
}

fn memo_or(memo: &str, default: &str) -> String {
    let trimmed = memo.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
