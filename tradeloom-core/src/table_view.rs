//! Full-table view: every record, newest year first.

use crate::data::{Table, TradeRecord};

/// All records sorted by year descending. Records sharing a year keep their
/// file order relative to each other.
pub fn rows_descending(table: &Table) -> Vec<&TradeRecord> {
    let mut rows: Vec<&TradeRecord> = table.records().iter().collect();
    rows.sort_by(|a, b| b.year.cmp(&a.year));
    rows
}

/// Header row for the view: year column first, then metrics in file order.
pub fn header(table: &Table) -> Vec<&str> {
    std::iter::once(table.year_column())
        .chain(table.metric_columns().iter().map(String::as_str))
        .collect()
}
