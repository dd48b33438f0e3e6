//! Column selector and comparison toggle.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(app.overlay == crate::app::Overlay::None))
        .title(" ⚙️ 분석 설정 ")
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("데이터 항목 선택 [j/k]", theme::muted())),
        Line::from(""),
    ];

    // Keep the cursor visible: reserve four lines for the toggle below.
    let visible = (inner.height as usize).saturating_sub(6).max(1);
    let start = app.cursor.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible).min(app.columns.len());

    for (i, column) in app.columns.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == app.cursor;
        let (marker, style) = if is_cursor {
            ("▶ ", theme::selected())
        } else {
            ("  ", theme::text())
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(column.as_str(), style),
        ]));
    }
    if app.columns.is_empty() {
        lines.push(Line::from(Span::styled("(no columns)", theme::muted())));
    }

    lines.push(Line::from(""));
    let checkbox = if app.selection.show_comparison { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(format!("{checkbox} "), theme::accent().add_modifier(Modifier::BOLD)),
        Span::styled("전체 산업과 비교하기 [c]", theme::text()),
    ]));

    f.render_widget(Paragraph::new(lines), inner);
}
