//! Application state: single-owner, main-thread only.
//!
//! The dashboard itself is never patched in place: every change to the
//! selection (and every reload) runs the full render pass again.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use tradeloom_core::dashboard::{render, DashboardView, DataSource, Selection};
use tradeloom_core::font::FontChoice;
use tradeloom_core::DashboardConfig;
use tradeloom_report::{write_report, ReportFormat};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Default output of the `e` key.
pub const EXPORT_PATH: &str = "tradeloom-dashboard.html";

pub struct AppState {
    pub running: bool,
    pub config: DashboardConfig,
    pub source: DataSource,
    pub selection: Selection,
    pub view: DashboardView,
    /// Metric columns of the last successful pass, kept while a pass fails so
    /// the sidebar stays usable.
    pub columns: Vec<String>,
    pub cursor: usize,
    pub show_table: bool,
    pub table_scroll: usize,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    pub rendered_at: NaiveDateTime,
    pub font: &'static FontChoice,
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(config: DashboardConfig, selection: Selection, font: &'static FontChoice) -> Self {
        let source = DataSource::from_config(&config);
        let view = render(&source, &selection, &config.columns);
        let mut app = Self {
            running: true,
            config,
            source,
            selection,
            view,
            columns: Vec::new(),
            cursor: 0,
            show_table: false,
            table_scroll: 0,
            overlay: Overlay::None,
            status_message: None,
            rendered_at: Local::now().naive_local(),
            font,
            export_path: PathBuf::from(EXPORT_PATH),
        };
        app.sync_from_view();
        app
    }

    /// Run the render pass again with the current selection.
    pub fn rebuild(&mut self) {
        self.view = render(&self.source, &self.selection, &self.config.columns);
        self.rendered_at = Local::now().naive_local();
        self.sync_from_view();
    }

    fn sync_from_view(&mut self) {
        match &self.view {
            DashboardView::Ready(dashboard) => {
                self.columns = dashboard.metric_columns().to_vec();
                self.cursor = self
                    .columns
                    .iter()
                    .position(|c| *c == dashboard.selected_column)
                    .unwrap_or(0);
                let max_scroll = dashboard.table.len().saturating_sub(1);
                self.table_scroll = self.table_scroll.min(max_scroll);
                if matches!(self.status_message, Some((_, StatusLevel::Error))) {
                    self.status_message = None;
                }
            }
            DashboardView::Failed(banner) => {
                warn!(message = %banner.message, "render pass failed");
                self.status_message = Some((banner.message.clone(), StatusLevel::Error));
            }
        }
    }

    /// Move the column cursor by `delta`, clamped, and re-render.
    pub fn move_selection(&mut self, delta: isize) {
        if self.columns.is_empty() {
            return;
        }
        let last = self.columns.len() - 1;
        let next = self.cursor.saturating_add_signed(delta).min(last);
        if next == self.cursor && self.selection.column.is_some() {
            return;
        }
        self.cursor = next;
        self.selection.column = Some(self.columns[next].clone());
        self.rebuild();
    }

    pub fn toggle_comparison(&mut self) {
        self.selection.show_comparison = !self.selection.show_comparison;
        self.rebuild();
    }

    pub fn toggle_table(&mut self) {
        self.show_table = !self.show_table;
        self.rebuild();
    }

    pub fn scroll_table(&mut self, delta: isize) {
        let rows = self.view.dashboard().map_or(0, |d| d.table.len());
        self.table_scroll = self
            .table_scroll
            .saturating_add_signed(delta)
            .min(rows.saturating_sub(1));
    }

    pub fn reload(&mut self) {
        self.rebuild();
        if self.view.dashboard().is_some() {
            self.set_status(format!("Reloaded {}", self.source.path.display()));
        }
    }

    /// Write the current view as an HTML page.
    pub fn export(&mut self) {
        let result = write_report(
            &self.export_path,
            ReportFormat::Html,
            &self.view,
            self.font,
            &self.config.columns,
            self.rendered_at,
        );
        match result {
            Ok(path) => {
                info!(path = %path.display(), "exported dashboard");
                self.set_status(format!("Exported {}", path.display()));
            }
            Err(e) => self.set_error(format!("Export failed: {e}")),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
