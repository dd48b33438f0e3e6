//! Raw data table, newest year first.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use tradeloom_core::dashboard::Dashboard;
use tradeloom_core::{format, table_view};

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, dashboard: &Dashboard, scroll: usize) {
    let header = Row::new(
        table_view::header(&dashboard.table)
            .into_iter()
            .map(|name| Cell::from(name.to_string())),
    )
    .style(theme::accent().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = dashboard
        .rows_descending()
        .into_iter()
        .skip(scroll)
        .map(|record| {
            let mut cells = vec![Cell::from(record.year.to_string())];
            cells.extend(record.values.iter().map(|v| Cell::from(format::cell(*v))));
            Row::new(cells).style(theme::text())
        })
        .collect();

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(dashboard.metric_columns().iter().map(|_| Constraint::Min(8)));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(format!(
                " 📄 원본 데이터 ({} rows) [t]close [PgUp/PgDn]scroll ",
                dashboard.table.len()
            ))
            .title_style(theme::accent_bold()),
    );

    f.render_widget(table, area);
}
