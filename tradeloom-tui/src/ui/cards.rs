//! Summary card row.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tradeloom_core::cards::SummaryCard;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, cards: &[SummaryCard; 3]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (card, area) in cards.iter().zip(columns.iter()) {
        render_card(f, *area, card);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &SummaryCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", card.heading()))
        .title_style(theme::text().add_modifier(Modifier::BOLD));

    let indicator = if card.indicator.is_delta() {
        format!("{} (전년비)", card.indicator.text())
    } else {
        card.indicator.text()
    };

    let lines = vec![
        Line::from(Span::styled(
            card.value_text.as_str(),
            theme::tone(card.value_tone).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(indicator, theme::tone(card.indicator.tone()))),
        Line::from(Span::styled(format!("{}", card.year), theme::muted())),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}
