//! Top-level UI layout: header, sidebar, dashboard body, status bar.

pub mod cards;
pub mod chart_panel;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;
pub mod table_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tradeloom_core::dashboard::{caption, Dashboard, DashboardView, ErrorBanner};

use crate::app::{AppState, Overlay};
use crate::theme;

const SIDEBAR_WIDTH: u16 = 38;
const CARD_HEIGHT: u16 = 5;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    sidebar::render(f, body[0], app);
    match &app.view {
        DashboardView::Ready(dashboard) => draw_dashboard(f, body[1], app, dashboard),
        DashboardView::Failed(banner) => draw_banner(f, body[1], banner),
    }

    status_bar::render(f, chunks[2], app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, chunks[1], app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mut title = vec![Span::styled(
        " 🧵 대한민국 섬유산업 수출입 동향 분석기",
        theme::accent_bold(),
    )];
    if let Some(dashboard) = app.view.dashboard() {
        title.push(Span::styled(
            format!("  data {}", dashboard.short_fingerprint()),
            theme::muted(),
        ));
    }

    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(format!(" {}", caption(app.rendered_at)), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &AppState, dashboard: &Dashboard) {
    let mut constraints = vec![Constraint::Length(CARD_HEIGHT), Constraint::Min(8)];
    if app.show_table {
        constraints.push(Constraint::Percentage(40));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    cards::render(f, rows[0], &dashboard.cards);

    match &dashboard.comparison {
        Some(comparison) => {
            let charts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
            chart_panel::render(f, charts[0], &dashboard.trend);
            chart_panel::render(f, charts[1], comparison);
        }
        None => chart_panel::render(f, rows[1], &dashboard.trend),
    }

    if app.show_table {
        table_panel::render(f, rows[2], dashboard, app.table_scroll);
    }
}

fn draw_banner(f: &mut Frame, area: Rect, banner: &ErrorBanner) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Error ")
        .title_style(theme::banner());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(banner.message.as_str(), theme::banner())),
        Line::from(""),
        Line::from(Span::styled("Press r to try again.", theme::muted())),
    ];
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
