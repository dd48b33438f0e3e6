//! Help overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tradeloom_core::font::FontSource;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("j / ↓", "next column"),
    ("k / ↑", "previous column"),
    ("g / G", "first / last column"),
    ("c", "toggle total-industry comparison"),
    ("t", "toggle raw data table"),
    ("PgUp / PgDn", "scroll the table"),
    ("r", "reload the data file"),
    ("e", "export the dashboard as HTML"),
    ("q / Esc", "quit"),
];

pub fn render_help(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help ")
        .title_style(theme::accent_bold());

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<12}"), theme::accent_bold()),
            Span::styled(*action, theme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Data: {}", app.source.path.display()),
        theme::muted(),
    )));
    let source = match &app.font.source {
        FontSource::Bundled { path } => format!("bundled {}", path.display()),
        FontSource::Platform { os } => format!("{os} system font"),
        FontSource::Fallback => "fallback".to_string(),
    };
    lines.push(Line::from(Span::styled(
        format!("  Export font: {} ({source})", app.font.family),
        theme::muted(),
    )));
    if let Some(note) = app.font.note {
        lines.push(Line::from(Span::styled(format!("  {note}"), theme::warning())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", theme::muted())));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), popup);
}
