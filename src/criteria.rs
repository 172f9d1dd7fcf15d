//! User-chosen filter and sort parameters for the transaction history.
//!
//! A [`FilterCriteria`] starts out all-permissive and is edited one field at a
//! time, either through its setters or by applying a [`CriteriaUpdate`].

use crate::money::Money;
use crate::transaction::{Direction, Status, TransactionRecord};
use chrono::NaiveDate;
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Order of the derived view by transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Compares two transactions by date only.
///
/// Equal dates compare equal; paired with a stable sort this keeps the source
/// order among same-day transactions.
pub fn compare_by_date(order: SortOrder, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    match order {
        SortOrder::Ascending => a.date().cmp(&b.date()),
        SortOrder::Descending => b.date().cmp(&a.date()),
    }
}

/// Full set of filter and sort parameters.
///
/// `None` on an optional field means "any" / "no bound".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Free text matched against description, category and id.
    pub query: String,
    pub direction: Option<Direction>,
    /// Exact, case-sensitive category label.
    pub category: Option<String>,
    pub status: Option<Status>,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
    /// Inclusive lower bound on the amount magnitude.
    pub min_amount: Option<Money>,
    /// Inclusive upper bound on the amount magnitude.
    pub max_amount: Option<Money>,
    pub sort: SortOrder,
}

/// A single-field edit of [`FilterCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaUpdate {
    Query(String),
    Direction(Option<Direction>),
    Category(Option<String>),
    Status(Option<Status>),
    DateFrom(Option<NaiveDate>),
    DateTo(Option<NaiveDate>),
    MinAmount(Option<Money>),
    MaxAmount(Option<Money>),
    Sort(SortOrder),
}

/// Names one field of [`FilterCriteria`], for resetting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaField {
    Query,
    Direction,
    Category,
    Status,
    DateFrom,
    DateTo,
    MinAmount,
    MaxAmount,
    Sort,
}

/// Label of an active filter, as shown on a removable chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub field: CriteriaField,
    pub label: String,
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FilterCriteria {
    /// Creates all-permissive criteria, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.matches_query(record)
            && self.direction.map_or(true, |d| d == record.direction())
            && self
                .category
                .as_deref()
                .map_or(true, |c| c == record.category())
            && self.status.map_or(true, |s| s == record.status())
            && self.date_from.map_or(true, |from| record.date() >= from)
            && self.date_to.map_or(true, |to| record.date() <= to)
            && self.min_amount.map_or(true, |min| record.amount() >= min)
            && self.max_amount.map_or(true, |max| record.amount() <= max)
    }

    fn matches_query(&self, record: &TransactionRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        record.description().to_lowercase().contains(&needle)
            || record.category().to_lowercase().contains(&needle)
            || record.id().to_lowercase().contains(&needle)
    }

    /// Applies a single-field edit.
    pub fn apply(&mut self, update: CriteriaUpdate) {
        match update {
            CriteriaUpdate::Query(query) => self.query = query,
            CriteriaUpdate::Direction(direction) => self.direction = direction,
            CriteriaUpdate::Category(category) => self.category = category,
            CriteriaUpdate::Status(status) => self.status = status,
            CriteriaUpdate::DateFrom(date) => self.date_from = date,
            CriteriaUpdate::DateTo(date) => self.date_to = date,
            CriteriaUpdate::MinAmount(amount) => self.min_amount = amount,
            CriteriaUpdate::MaxAmount(amount) => self.max_amount = amount,
            CriteriaUpdate::Sort(order) => self.sort = order,
        }
    }

    /// Puts one field back to its default.
    pub fn reset(&mut self, field: CriteriaField) {
        let defaults = FilterCriteria::default();
        match field {
            CriteriaField::Query => self.query = defaults.query,
            CriteriaField::Direction => self.direction = defaults.direction,
            CriteriaField::Category => self.category = defaults.category,
            CriteriaField::Status => self.status = defaults.status,
            CriteriaField::DateFrom => self.date_from = defaults.date_from,
            CriteriaField::DateTo => self.date_to = defaults.date_to,
            CriteriaField::MinAmount => self.min_amount = defaults.min_amount,
            CriteriaField::MaxAmount => self.max_amount = defaults.max_amount,
            CriteriaField::Sort => self.sort = defaults.sort,
        }
    }

    /// Resets every filter, keeping the current sort order.
    pub fn clear_filters(&mut self) {
        *self = FilterCriteria {
            sort: self.sort,
            ..FilterCriteria::default()
        };
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.flipped();
    }

    /// Returns `true` if any filter (sort order aside) narrows the view.
    pub fn has_active_filters(&self) -> bool {
        !self.active_filters().is_empty()
    }

    /// Labels for every active filter in display order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();
        let mut push = |field, label: String| chips.push(ActiveFilter { field, label });

        if !self.query.is_empty() {
            push(CriteriaField::Query, format!("Search: {}", self.query));
        }
        if let Some(direction) = self.direction {
            push(CriteriaField::Direction, format!("Type: {}", direction));
        }
        if let Some(category) = &self.category {
            push(CriteriaField::Category, format!("Category: {}", category));
        }
        if let Some(status) = self.status {
            push(CriteriaField::Status, format!("Status: {}", status));
        }
        if let Some(from) = self.date_from {
            push(CriteriaField::DateFrom, format!("From: {}", from.format("%b %d, %Y")));
        }
        if let Some(to) = self.date_to {
            push(CriteriaField::DateTo, format!("To: {}", to.format("%b %d, %Y")));
        }
        if let Some(min) = self.min_amount {
            push(CriteriaField::MinAmount, format!("Min: ${}", min));
        }
        if let Some(max) = self.max_amount {
            push(CriteriaField::MaxAmount, format!("Max: ${}", max));
        }

        chips
    }

    /// Sets the lower amount bound from raw input text.
    ///
    /// Empty or unparseable text clears the bound rather than failing.
    pub fn set_min_amount_text(&mut self, text: &str) {
        self.min_amount = parse_bound("min", text);
    }

    /// Sets the upper amount bound from raw input text.
    ///
    /// Empty or unparseable text clears the bound rather than failing.
    pub fn set_max_amount_text(&mut self, text: &str) {
        self.max_amount = parse_bound("max", text);
    }
}

fn parse_bound(name: &str, text: &str) -> Option<Money> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Money::from_str(trimmed) {
        Ok(amount) => Some(amount),
        Err(e) => {
            debug!("Ignoring {} amount '{}': {}", name, trimmed, e);
            None
        }
    }
}
