//! Terminal color tokens.
//!
//! Card tones map onto the same warm/cool palette as the HTML page: warm red
//! for a rising change, cool blue for a flat or falling one.

use ratatui::style::{Color, Modifier, Style};

use tradeloom_core::cards::Tone;
use tradeloom_core::chart::Rgb;

pub const ACCENT: Color = Color::Rgb(138, 43, 226);
pub const WARM: Color = Color::Rgb(255, 75, 75);
pub const COOL: Color = Color::Rgb(28, 131, 225);
pub const POSITIVE: Color = Color::Rgb(46, 139, 87);
pub const NEGATIVE: Color = Color::Rgb(205, 92, 92);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const MUTED: Color = Color::Rgb(140, 140, 150);
pub const TEXT: Color = Color::White;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Warm => WARM,
        Tone::Cool => COOL,
        Tone::Neutral => MUTED,
        Tone::Positive => POSITIVE,
        Tone::Negative => NEGATIVE,
        Tone::Accent => ACCENT,
    }
}

pub fn series_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn tone(tone: Tone) -> Style {
    Style::default().fg(tone_color(tone))
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn banner() -> Style {
    Style::default().fg(WARM).add_modifier(Modifier::BOLD)
}

pub fn selected() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}
