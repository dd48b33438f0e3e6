//! The render pass.
//!
//! `render` is the whole dashboard as one function of the data file and the
//! user's selection. It reads the file, builds the cards and charts, and turns
//! any failure into an `ErrorBanner`. Front ends call it again after every
//! interaction; nothing is carried over between calls.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::cards::{build_cards, SummaryCard};
use crate::chart::{comparison_chart, trend_chart, ChartSpec};
use crate::config::{DashboardConfig, TrackedColumns};
use crate::data::{load_table, LoadError, ParseError, Table, TradeRecord};
use crate::table_view;

/// Where and how to read the statistics file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub path: PathBuf,
    pub encoding: String,
    pub year_column: String,
    pub default_column_index: usize,
}

impl DataSource {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            path: config.data_path.clone(),
            encoding: config.encoding.clone(),
            year_column: config.year_column.clone(),
            default_column_index: config.default_column_index,
        }
    }
}

/// What the user picked. `column: None` means the default column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub column: Option<String>,
    pub show_comparison: bool,
}

impl Selection {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            column: Some(name.into()),
            show_comparison: false,
        }
    }

    pub fn with_comparison(mut self, show: bool) -> Self {
        self.show_comparison = show;
        self
    }

    /// Name of the selected metric column in `table`.
    pub fn resolve_column(&self, table: &Table, default_index: usize) -> Result<String, ParseError> {
        match &self.column {
            Some(name) => table
                .column_index(name)
                .map(|_| name.clone())
                .ok_or_else(|| ParseError::MissingColumn(name.clone())),
            None => default_column(table, default_index)
                .map(str::to_string)
                .ok_or_else(|| ParseError::MissingColumn(format!("#{default_index}"))),
        }
    }
}

/// The metric column at `index`, or the last one when the file is narrower.
pub fn default_column(table: &Table, index: usize) -> Option<&str> {
    let columns = table.metric_columns();
    columns
        .get(index.min(columns.len().saturating_sub(1)))
        .map(String::as_str)
}

/// A fully built dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    #[serde(skip)]
    pub table: Table,
    pub selected_column: String,
    pub cards: [SummaryCard; 3],
    pub trend: ChartSpec,
    pub comparison: Option<ChartSpec>,
    pub fingerprint: String,
}

impl Dashboard {
    pub fn metric_columns(&self) -> &[String] {
        self.table.metric_columns()
    }

    pub fn rows_descending(&self) -> Vec<&TradeRecord> {
        table_view::rows_descending(&self.table)
    }

    /// First twelve hex digits of the data fingerprint.
    pub fn short_fingerprint(&self) -> &str {
        self.fingerprint.get(..12).unwrap_or(&self.fingerprint)
    }

    /// Footer line with the update time and the data source.
    pub fn caption(&self, now: NaiveDateTime) -> String {
        caption(now)
    }
}

/// `최종 업데이트: 2024-12-31 09:30:00 | 데이터 출처: 산업통상자원부`
pub fn caption(now: NaiveDateTime) -> String {
    format!(
        "최종 업데이트: {} | 데이터 출처: 산업통상자원부",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    MissingFile,
    Processing,
}

/// The single message shown instead of the dashboard when a pass fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBanner {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&LoadError> for ErrorBanner {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::FileNotFound { path } => Self {
                kind: ErrorKind::MissingFile,
                message: format!("❌ '{}' 파일을 찾을 수 없습니다.", path.display()),
            },
            other => Self {
                kind: ErrorKind::Processing,
                message: format!("❌ 예상치 못한 오류가 발생했습니다: {other}"),
            },
        }
    }
}

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Ready(Box<Dashboard>),
    Failed(ErrorBanner),
}

impl DashboardView {
    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            DashboardView::Ready(d) => Some(d),
            DashboardView::Failed(_) => None,
        }
    }

    pub fn banner(&self) -> Option<&ErrorBanner> {
        match self {
            DashboardView::Ready(_) => None,
            DashboardView::Failed(b) => Some(b),
        }
    }
}

/// Read the data file and build the dashboard for `selection`.
pub fn render(source: &DataSource, selection: &Selection, tracked: &TrackedColumns) -> DashboardView {
    let result = load_table(&source.path, &source.encoding, &source.year_column)
        .and_then(|table| Ok(build(table, selection, tracked, source.default_column_index)?));

    match result {
        Ok(dashboard) => DashboardView::Ready(Box::new(dashboard)),
        Err(err) => {
            debug!(error = %err, "render pass failed");
            DashboardView::Failed(ErrorBanner::from(&err))
        }
    }
}

/// Build the dashboard from an already loaded table.
pub fn build(
    table: Table,
    selection: &Selection,
    tracked: &TrackedColumns,
    default_column_index: usize,
) -> Result<Dashboard, ParseError> {
    let selected_column = selection.resolve_column(&table, default_column_index)?;
    let cards = build_cards(&table, tracked)?;
    let trend = trend_chart(&table, &selected_column)?;
    let comparison = if selection.show_comparison {
        Some(comparison_chart(&table, tracked)?)
    } else {
        None
    };
    let fingerprint = table.fingerprint();

    Ok(Dashboard {
        table,
        selected_column,
        cards,
        trend,
        comparison,
        fingerprint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tracked() -> TrackedColumns {
        TrackedColumns {
            export: "export".into(),
            export_yoy: "export_yoy".into(),
            import: "import".into(),
            import_yoy: "import_yoy".into(),
            balance: "balance".into(),
            export_share: "share".into(),
            total_export: "total".into(),
        }
    }

    fn table() -> Table {
        let columns = ["export", "export_yoy", "import", "import_yoy", "balance", "share", "total"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Table::new(
            "year",
            columns,
            vec![
                TradeRecord::new(2023, vec![Some(12400.0), Some(1.0), Some(9400.0), Some(0.5), Some(3000.0), Some(8.1), Some(600000.0)]),
                TradeRecord::new(2024, vec![Some(12000.0), Some(-3.2), Some(9500.0), Some(1.1), Some(2500.0), Some(7.8), Some(620000.0)]),
            ],
        )
    }

    #[test]
    fn default_column_is_sixth_metric() {
        let t = table();
        assert_eq!(default_column(&t, 5), Some("share"));
        assert_eq!(default_column(&t, 40), Some("total"));

        let narrow = Table::new("year", vec!["a".into()], vec![TradeRecord::new(2020, vec![None])]);
        assert_eq!(default_column(&narrow, 5), Some("a"));
    }

    #[test]
    fn builds_with_default_selection() {
        let d = build(table(), &Selection::default(), &tracked(), 5).unwrap();
        assert_eq!(d.selected_column, "share");
        assert_eq!(d.trend.series[0].values(), vec![8.1, 7.8]);
        assert!(d.comparison.is_none());
        assert_eq!(d.cards[0].value_text, "12,000 M$");
        assert_eq!(d.short_fingerprint().len(), 12);
    }

    #[test]
    fn comparison_only_when_requested() {
        let selection = Selection::column("export").with_comparison(true);
        let d = build(table(), &selection, &tracked(), 5).unwrap();
        assert_eq!(d.selected_column, "export");
        assert_eq!(d.comparison.unwrap().series.len(), 2);
    }

    #[test]
    fn unknown_selection_is_a_processing_error() {
        let err = build(table(), &Selection::column("bogus"), &tracked(), 5).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn(ref c) if c == "bogus"));
    }

    #[test]
    fn missing_file_banner_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource {
            path: dir.path().join("trade.csv"),
            encoding: "cp949".into(),
            year_column: "year".into(),
            default_column_index: 5,
        };
        let view = render(&source, &Selection::default(), &tracked());
        assert!(view.dashboard().is_none());
        let banner = view.banner().unwrap();
        assert_eq!(banner.kind, ErrorKind::MissingFile);
        assert!(banner.message.contains("trade.csv"));
        assert!(banner.message.starts_with("❌ '"));
    }

    #[test]
    fn parse_failure_is_generic_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trade.csv");
        std::fs::write(&path, "year,a\n2020,oops\n").unwrap();
        let source = DataSource {
            path,
            encoding: "utf-8".into(),
            year_column: "year".into(),
            default_column_index: 0,
        };
        let banner = render(&source, &Selection::default(), &tracked())
            .banner()
            .cloned()
            .unwrap();
        assert_eq!(banner.kind, ErrorKind::Processing);
        assert!(banner.message.starts_with("❌ 예상치 못한 오류가 발생했습니다: "));
        assert!(banner.message.contains("oops"));
    }

    #[test]
    fn caption_format() {
        let now = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(
            caption(now),
            "최종 업데이트: 2024-12-31 09:05:00 | 데이터 출처: 산업통상자원부"
        );
    }
}
