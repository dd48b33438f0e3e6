//! Year-keyed trade table.
//!
//! A `Table` is the decoded contents of one statistics file: the name of the
//! year column, the remaining (metric) column names in header order, and one
//! `TradeRecord` per data row in file order. Tables are built once per render
//! pass and only read afterwards.

use serde::{Deserialize, Serialize};

/// One year's row of trade metrics.
///
/// `values[i]` belongs to `Table::metric_columns()[i]`; a `None` is an empty
/// or missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

impl TradeRecord {
    pub fn new(year: i32, values: Vec<Option<f64>>) -> Self {
        Self { year, values }
    }

    /// Value at a metric column index, `None` when missing or out of range.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// Ordered sequence of records sharing one header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    year_column: String,
    columns: Vec<String>,
    records: Vec<TradeRecord>,
}

impl Table {
    /// Build a table. Every record must carry one value per metric column;
    /// short rows are padded with `None` and long rows truncated.
    pub fn new(year_column: impl Into<String>, columns: Vec<String>, records: Vec<TradeRecord>) -> Self {
        let width = columns.len();
        let records = records
            .into_iter()
            .map(|mut r| {
                r.values.resize(width, None);
                r
            })
            .collect();
        Self {
            year_column: year_column.into(),
            columns,
            records,
        }
    }

    pub fn year_column(&self) -> &str {
        &self.year_column
    }

    /// All column names except the year column, header order preserved.
    pub fn metric_columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in file order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last record in file order, which need not hold the largest year.
    pub fn latest(&self) -> Option<&TradeRecord> {
        self.records.last()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// `(year, value)` pairs for one column in file order, skipping empty cells.
    pub fn column_points(&self, index: usize) -> Vec<(i32, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.value(index).map(|v| (r.year, v)))
            .collect()
    }

    /// Deterministic BLAKE3 hash over the header and every cell.
    ///
    /// Missing cells hash differently from any number, so a blank cell and a
    /// zero never collide.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();

        hasher.update(self.year_column.as_bytes());
        for column in &self.columns {
            hasher.update(&[0x1f]);
            hasher.update(column.as_bytes());
        }

        for record in &self.records {
            hasher.update(&[0x1e]);
            hasher.update(&record.year.to_le_bytes());
            for value in &record.values {
                match value {
                    Some(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_le_bytes());
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        }

        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            "연도",
            vec!["a".into(), "b".into()],
            vec![
                TradeRecord::new(2022, vec![Some(1.0), Some(2.0)]),
                TradeRecord::new(2023, vec![None, Some(4.0)]),
                TradeRecord::new(2021, vec![Some(5.0), Some(6.0)]),
            ],
        )
    }

    #[test]
    fn latest_is_last_row_not_max_year() {
        let table = sample();
        assert_eq!(table.latest().unwrap().year, 2021);
    }

    #[test]
    fn column_points_skip_missing_cells() {
        let table = sample();
        assert_eq!(table.column_points(0), vec![(2022, 1.0), (2021, 5.0)]);
        assert_eq!(table.column_points(1), vec![(2022, 2.0), (2023, 4.0), (2021, 6.0)]);
    }

    #[test]
    fn short_rows_are_padded() {
        let table = Table::new(
            "year",
            vec!["a".into(), "b".into()],
            vec![TradeRecord::new(2020, vec![Some(1.0)])],
        );
        assert_eq!(table.records()[0].values, vec![Some(1.0), None]);
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let c = Table::new(
            "연도",
            vec!["a".into(), "b".into()],
            vec![
                TradeRecord::new(2022, vec![Some(1.0), Some(2.0)]),
                TradeRecord::new(2023, vec![Some(0.0), Some(4.0)]),
                TradeRecord::new(2021, vec![Some(5.0), Some(6.0)]),
            ],
        );
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
