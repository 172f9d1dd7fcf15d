//! Query engine over an account's transaction history.
//!
//! Every call to [`QueryEngine::view`] filters the full source collection and
//! sorts the survivors by date. Nothing is cached: the view is always a pure
//! function of the source and the current criteria.

use crate::criteria::{compare_by_date, CriteriaField, CriteriaUpdate, FilterCriteria};
use crate::source::TransactionSource;
use crate::transaction::TransactionRecord;
use log::debug;
use std::collections::HashSet;
use std::fmt;

/// Distinct category labels of `records`, in first-seen order.
pub fn category_index(records: &[TransactionRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(TransactionRecord::category)
        .filter(|category| seen.insert(*category))
        .collect()
}

/// The transaction query engine.
///
/// Owns the session's [`FilterCriteria`] and borrows its records from the
/// injected source.
///
/// # Ordering
///
/// The view is sorted by date only. The sort is stable, so transactions
/// sharing a date keep their source order in both directions.
pub struct QueryEngine<S> {
    source: S,
    criteria: FilterCriteria,
}

impl<S: TransactionSource> QueryEngine<S> {
    /// Creates an engine with all-permissive criteria.
    pub fn new(source: S) -> Self {
        QueryEngine {
            source,
            criteria: FilterCriteria::default(),
        }
    }

    /// Creates an engine starting from the given criteria.
    pub fn with_criteria(source: S, criteria: FilterCriteria) -> Self {
        QueryEngine { source, criteria }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    /// Applies a single-field edit to the criteria.
    pub fn apply(&mut self, update: CriteriaUpdate) {
        debug!("Criteria update: {:?}", update);
        self.criteria.apply(update);
    }

    /// Resets one criteria field to its default.
    pub fn reset(&mut self, field: CriteriaField) {
        debug!("Criteria reset: {:?}", field);
        self.criteria.reset(field);
    }

    /// Distinct categories across the whole source, for the category picker.
    pub fn categories(&self) -> Vec<&str> {
        category_index(self.source.records())
    }

    /// Recomputes the filtered, sorted view from the full source.
    pub fn view(&self) -> DerivedView<'_> {
        let all = self.source.records();

        let mut records: Vec<&TransactionRecord> =
            all.iter().filter(|r| self.criteria.matches(r)).collect();

        let order = self.criteria.sort;
        records.sort_by(|a, b| compare_by_date(order, a, b));

        debug!("View: {} of {} transactions", records.len(), all.len());

        DerivedView {
            records,
            total: all.len(),
        }
    }
}

/// The filtered, sorted projection shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView<'a> {
    records: Vec<&'a TransactionRecord>,
    total: usize,
}

impl<'a> DerivedView<'a> {
    /// Matching transactions in display order.
    pub fn records(&self) -> &[&'a TransactionRecord] {
        &self.records
    }

    /// Number of matching transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size of the unfiltered source collection.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TransactionRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Renders the "N of M" match indicator.
impl fmt::Display for DerivedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.len(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::SortOrder;
    use crate::money::Money;
    use crate::source::StaticSource;
    use crate::transaction::{Direction, Status};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn record(id: &str, day: u32, description: &str, amount: &str, category: &str) -> TransactionRecord {
        TransactionRecord::new(
            id,
            NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            description,
            Money::from_str(amount).unwrap(),
            Direction::Debit,
            category,
            Money::ZERO,
            Status::Completed,
        )
        .unwrap()
    }

    fn engine() -> QueryEngine<StaticSource> {
        QueryEngine::new(StaticSource::new(vec![
            record("1", 14, "Restaurant Payment", "45.50", "Dining"),
            record("2", 16, "Online Transfer to Savings", "500.00", "Transfer"),
            record("3", 8, "Coffee Shop", "5.75", "Dining"),
            record("4", 16, "Gas Station", "65.20", "Transportation"),
        ]))
    }

    fn ids(view: &DerivedView<'_>) -> Vec<String> {
        view.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_default_view_is_newest_first() {
        let engine = engine();
        let view = engine.view();
        assert_eq!(view.len(), 4);
        assert_eq!(view.total(), 4);
        // Ids 2 and 4 share a date and keep source order.
        assert_eq!(ids(&view), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_ascending_keeps_ties_in_source_order() {
        let mut engine = engine();
        engine.apply(CriteriaUpdate::Sort(SortOrder::Ascending));
        assert_eq!(ids(&engine.view()), vec!["3", "1", "2", "4"]);
    }

    #[test]
    fn test_filtered_view_and_label() {
        let mut engine = engine();
        engine.apply(CriteriaUpdate::Category(Some("Dining".to_string())));
        let view = engine.view();
        assert_eq!(ids(&view), vec!["1", "3"]);
        assert_eq!(view.to_string(), "2 of 4");
    }

    #[test]
    fn test_empty_view() {
        let mut engine = engine();
        engine.apply(CriteriaUpdate::Query("mortgage".to_string()));
        let view = engine.view();
        assert!(view.is_empty());
        assert_eq!(view.to_string(), "0 of 4");
    }

    #[test]
    fn test_reset_restores_view() {
        let mut engine = engine();
        let before = ids(&engine.view());

        engine.apply(CriteriaUpdate::MinAmount(Some(Money::from_str("100").unwrap())));
        assert_eq!(ids(&engine.view()), vec!["2"]);

        engine.reset(CriteriaField::MinAmount);
        assert_eq!(ids(&engine.view()), before);
    }

    #[test]
    fn test_categories_are_distinct_in_first_seen_order() {
        let engine = engine();
        assert_eq!(engine.categories(), vec!["Dining", "Transfer", "Transportation"]);
    }

    #[test]
    fn test_categories_of_empty_source() {
        let engine = QueryEngine::new(StaticSource::default());
        assert!(engine.categories().is_empty());
        assert!(engine.view().is_empty());
    }
}
