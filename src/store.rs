//! The in-memory row store.
//!
//! Rows are addressed by their current position. A position is not a stable identity: after a
//! delete or a reload the same index can refer to a different record, so callers must resolve an
//! index right before each mutating call and must not keep it afterwards.

use crate::model::{Amount, Record, Summary};
use rust_decimal::Decimal;
use tracing::trace;

/// The ordered sequence of records held by the application.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct RowStore {
    records: Vec<Record>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Appends `record` to the end of the table.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
        trace!("Added row {}", self.records.len() - 1);
    }

    /// Replaces the record at `index` and returns the one it replaced. Does nothing and returns
    /// `None` if `index` is out of range.
    pub fn update(&mut self, index: usize, record: Record) -> Option<Record> {
        let slot = self.records.get_mut(index)?;
        trace!("Updated row {index}");
        Some(std::mem::replace(slot, record))
    }

    /// Removes and returns the record at `index`, shifting later records down by one. Does
    /// nothing and returns `None` if `index` is out of range.
    pub fn delete_at(&mut self, index: usize) -> Option<Record> {
        if index >= self.records.len() {
            return None;
        }
        trace!("Deleted row {index}");
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Clears the store and adds each of `records` in order.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = Record>) {
        self.clear();
        for record in records {
            self.add(record);
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    /// Sums the cost column, ignoring `$` and `,`. A cost that is not a number counts as zero; the
    /// record itself is left alone. A sum past the `Decimal` range saturates at `Decimal::MAX`
    /// (or `Decimal::MIN` for negative costs).
    pub fn total_cost(&self) -> Decimal {
        self.records
            .iter()
            .map(|r| Amount::parse_or_zero(&r.cost))
            .fold(Decimal::ZERO, |total, cost| {
                total.checked_add(cost).unwrap_or(if cost.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
            })
    }

    pub fn average_cost(&self) -> Decimal {
        self.summary().average_cost().value()
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.count(), self.total_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record_with_cost(item: &str, cost: &str) -> Record {
        Record {
            item: item.to_string(),
            cost: cost.to_string(),
            ..Default::default()
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = RowStore::new();
        store.add(record_with_cost("a", "$1.00"));
        store.add(record_with_cost("b", "$2.00"));
        store.add(record_with_cost("a", "$1.00"));
        assert_eq!(store.count(), 3);
        let items: Vec<&str> = store.all_records().iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_update() {
        let mut store = RowStore::from_records(Record::examples());
        let old = store.update(1, record_with_cost("Stool", "$5.00")).unwrap();
        assert_eq!(old.item, "Desk Chair");
        assert_eq!(store.get(1).unwrap().item, "Stool");
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_update_out_of_range_is_a_no_op() {
        let mut store = RowStore::from_records(Record::examples());
        assert!(store.update(3, record_with_cost("x", "$1")).is_none());
        assert_eq!(store.all_records(), Record::examples().as_slice());
    }

    #[test]
    fn test_delete_shifts_later_rows() {
        let mut store = RowStore::from_records(Record::examples());
        let deleted = store.delete_at(0).unwrap();
        assert_eq!(deleted.item, "Laptop");
        assert_eq!(store.count(), 2);
        assert_eq!(store.get(0).unwrap().item, "Desk Chair");
        assert_eq!(store.get(1).unwrap().item, "Paper Reams");
    }

    #[test]
    fn test_delete_out_of_range_is_a_no_op() {
        let mut store = RowStore::from_records(Record::examples());
        assert!(store.delete_at(3).is_none());
        assert!(store.delete_at(usize::MAX).is_none());
        assert_eq!(store.count(), 3);
        assert_eq!(store.all_records(), Record::examples().as_slice());

        let mut empty = RowStore::new();
        assert!(empty.delete_at(0).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = RowStore::from_records(Record::examples());
        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.all_records().is_empty());
        assert_eq!(store.total_cost(), Decimal::ZERO);
    }

    #[test]
    fn test_replace_all() {
        let mut store = RowStore::from_records(vec![record_with_cost("old", "$1")]);
        store.replace_all(Record::examples());
        assert_eq!(store.all_records(), Record::examples().as_slice());
    }

    #[test]
    fn test_total_cost() {
        let store = RowStore::from_records(Record::examples());
        assert_eq!(store.total_cost(), dec("7244.45"));
    }

    #[test]
    fn test_total_cost_treats_bad_values_as_zero() {
        let mut store = RowStore::new();
        store.add(record_with_cost("a", "$10.00"));
        store.add(record_with_cost("b", "$5.50"));
        store.add(record_with_cost("c", "bad"));
        assert_eq!(store.total_cost(), dec("15.50"));
        // The malformed record is still in the store.
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(2).unwrap().cost, "bad");
    }

    #[test]
    fn test_total_cost_strips_grouping_separators() {
        let mut store = RowStore::new();
        store.add(record_with_cost("a", "$1,000.00"));
        store.add(record_with_cost("b", "2,500"));
        assert_eq!(store.total_cost(), dec("3500"));
    }

    #[test]
    fn test_total_cost_saturates_instead_of_overflowing() {
        let mut store = RowStore::new();
        store.add(record_with_cost("a", "79228162514264337593543950335"));
        store.add(record_with_cost("b", "$79,228,162,514,264,337,593,543,950,335"));
        store.add(record_with_cost("c", "$1.00"));
        assert_eq!(store.total_cost(), Decimal::MAX);
        assert_eq!(store.summary().entries(), 3);
        assert_eq!(store.average_cost(), Decimal::MAX / Decimal::from(3));

        let mut store = RowStore::new();
        store.add(record_with_cost("a", "-79228162514264337593543950335"));
        store.add(record_with_cost("b", "-1"));
        assert_eq!(store.total_cost(), Decimal::MIN);
    }

    #[test]
    fn test_average_cost() {
        let mut store = RowStore::new();
        assert_eq!(store.average_cost(), Decimal::ZERO);
        store.add(record_with_cost("a", "$10.00"));
        store.add(record_with_cost("b", "$5.00"));
        assert_eq!(store.average_cost(), dec("7.5"));
        assert_eq!(store.summary().entries(), 2);
    }
}
