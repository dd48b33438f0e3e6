//! Summary cards for the latest year.
//!
//! Three cards are built from the last record of the table:
//! - textile exports, with the year-over-year export change
//! - textile imports, with the year-over-year import change
//! - textile trade balance, with the export share
//!
//! A change strictly above zero is shown as an up arrow in a warm tone; zero
//! and below as a down arrow in a cool tone. When the change is missing the
//! card falls back to the neutral export-share line.

use serde::Serialize;

use crate::config::TrackedColumns;
use crate::data::{ParseError, Table, TradeRecord};
use crate::format;

/// Which metric a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardKind {
    Export,
    Import,
    Balance,
}

impl CardKind {
    pub fn icon(self) -> &'static str {
        match self {
            CardKind::Export => "🧶",
            CardKind::Import => "📉",
            CardKind::Balance => "💰",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CardKind::Export => "섬유 수출액",
            CardKind::Import => "섬유 수입액",
            CardKind::Balance => "섬유 무역수지",
        }
    }
}

/// Semantic color of a card element. Front ends map tones to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    /// Rising change.
    Warm,
    /// Flat or falling change.
    Cool,
    /// Informational line.
    Neutral,
    /// Surplus.
    Positive,
    /// Deficit.
    Negative,
    /// Headline value with no sign semantics.
    Accent,
}

/// The line under a card value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Indicator {
    /// Positive change, magnitude in percent.
    Up(f64),
    /// Zero or negative change, magnitude in percent.
    Down(f64),
    /// Export share in percent, if known.
    Share(Option<f64>),
}

impl Indicator {
    /// Pick the indicator for a year-over-year change; `share` is used when
    /// the change is missing.
    pub fn from_delta(delta: Option<f64>, share: Option<f64>) -> Self {
        match delta.filter(|d| d.is_finite()) {
            Some(d) if d > 0.0 => Indicator::Up(d),
            Some(d) => Indicator::Down(d.abs()),
            None => Indicator::Share(share),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Indicator::Up(_) => Tone::Warm,
            Indicator::Down(_) => Tone::Cool,
            Indicator::Share(_) => Tone::Neutral,
        }
    }

    pub fn arrow(&self) -> Option<char> {
        match self {
            Indicator::Up(_) => Some('▲'),
            Indicator::Down(_) => Some('▼'),
            Indicator::Share(_) => None,
        }
    }

    /// `▲1.1%`, `▼3.2%` or `share: 7.8%`.
    pub fn text(&self) -> String {
        match self {
            Indicator::Up(pct) | Indicator::Down(pct) => {
                let arrow = self.arrow().unwrap_or(' ');
                format!("{arrow}{}%", format::percent(*pct))
            }
            Indicator::Share(Some(pct)) => format!("share: {}%", format::percent(*pct)),
            Indicator::Share(None) => format!("share: {}", format::MISSING),
        }
    }

    /// True for the arrow variants, whose text gets a "vs. last year" suffix.
    pub fn is_delta(&self) -> bool {
        self.arrow().is_some()
    }
}

/// One rendered summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub kind: CardKind,
    pub year: i32,
    /// Stored value, unrounded.
    pub value: Option<f64>,
    /// `12,000 M$`.
    pub value_text: String,
    pub value_tone: Tone,
    pub indicator: Indicator,
}

impl SummaryCard {
    pub fn heading(&self) -> String {
        format!("{} {}", self.kind.icon(), self.kind.title())
    }
}

fn require(table: &Table, name: &str) -> Result<usize, ParseError> {
    table
        .column_index(name)
        .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
}

fn delta_card(
    kind: CardKind,
    latest: &TradeRecord,
    value_idx: usize,
    delta_idx: usize,
    share: Option<f64>,
) -> SummaryCard {
    let value = latest.value(value_idx);
    SummaryCard {
        kind,
        year: latest.year,
        value,
        value_text: format::million_usd(value),
        value_tone: Tone::Accent,
        indicator: Indicator::from_delta(latest.value(delta_idx), share),
    }
}

/// Build the export, import and balance cards from the latest record.
pub fn build_cards(table: &Table, columns: &TrackedColumns) -> Result<[SummaryCard; 3], ParseError> {
    let export_idx = require(table, &columns.export)?;
    let export_yoy_idx = require(table, &columns.export_yoy)?;
    let import_idx = require(table, &columns.import)?;
    let import_yoy_idx = require(table, &columns.import_yoy)?;
    let balance_idx = require(table, &columns.balance)?;
    let share_idx = require(table, &columns.export_share)?;

    let latest = table.latest().ok_or(ParseError::NoRows)?;
    let share = latest.value(share_idx);

    let balance = latest.value(balance_idx);
    let balance_tone = match balance {
        Some(b) if b > 0.0 => Tone::Positive,
        _ => Tone::Negative,
    };

    Ok([
        delta_card(CardKind::Export, latest, export_idx, export_yoy_idx, share),
        delta_card(CardKind::Import, latest, import_idx, import_yoy_idx, share),
        SummaryCard {
            kind: CardKind::Balance,
            year: latest.year,
            value: balance,
            value_text: format::million_usd(balance),
            value_tone: balance_tone,
            indicator: Indicator::Share(share),
        },
    ])
}
