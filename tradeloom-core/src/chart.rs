//! Chart specifications shared by the SVG and terminal renderers.
//!
//! A `ChartSpec` is backend-neutral: titles, axis labels, and one or more
//! series of raw `(year, value)` points in file order. No smoothing or
//! interpolation is applied; empty cells are left out of the series.

use serde::Serialize;

use crate::config::TrackedColumns;
use crate::data::{ParseError, Table};

/// Primary series color (blue violet).
pub const INDUSTRY_COLOR: Rgb = Rgb(138, 43, 226);
/// Reference series color (dark gray).
pub const TOTAL_COLOR: Rgb = Rgb(169, 169, 169);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#8a2be2`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Visual treatment of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub color: Rgb,
    /// 0.0..=1.0
    pub opacity: f64,
    pub stroke_width: u32,
    pub markers: bool,
    /// Opacity of the area between the line and zero, if shaded.
    pub fill_opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(i32, f64)>,
}

impl Series {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, v)| v).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Trend,
    Comparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Keep zero inside the value axis (needed for shaded areas).
    pub include_zero: bool,
    pub show_legend: bool,
}

impl ChartSpec {
    /// Smallest and largest year across all series.
    pub fn x_bounds(&self) -> Option<(i32, i32)> {
        let years = self.series.iter().flat_map(|s| s.points.iter().map(|&(x, _)| x));
        let (min, max) = years.fold((i32::MAX, i32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        (min <= max).then_some((min, max))
    }

    /// Value range with 5% padding on each side. A flat series gets a
    /// padding of one unit so the axis never collapses. Non-finite values
    /// are ignored.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .filter(|y| y.is_finite());
        let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if min > max {
            return None;
        }
        if self.include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }

        let range = max - min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let lower = if self.include_zero && min >= 0.0 { 0.0 } else { min - pad };
        Some((lower, max + pad))
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

fn require(table: &Table, name: &str) -> Result<usize, ParseError> {
    table
        .column_index(name)
        .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
}

/// Single-series line chart of one metric column across all years.
pub fn trend_chart(table: &Table, column: &str) -> Result<ChartSpec, ParseError> {
    let idx = require(table, column)?;

    Ok(ChartSpec {
        kind: ChartKind::Trend,
        title: format!("연도별 {column} 변화 추이"),
        x_label: "연도".into(),
        y_label: "수치".into(),
        series: vec![Series {
            label: column.to_string(),
            style: SeriesStyle {
                color: INDUSTRY_COLOR,
                opacity: 1.0,
                stroke_width: 2,
                markers: true,
                fill_opacity: None,
            },
            points: table.column_points(idx),
        }],
        include_zero: false,
        show_legend: false,
    })
}

/// Textile exports against total-industry exports, same axes, same unit.
pub fn comparison_chart(table: &Table, columns: &TrackedColumns) -> Result<ChartSpec, ParseError> {
    let total_idx = require(table, &columns.total_export)?;
    let industry_idx = require(table, &columns.export)?;

    Ok(ChartSpec {
        kind: ChartKind::Comparison,
        title: "전체 산업 vs 섬유산업 수출 규모 비교".into(),
        x_label: "연도".into(),
        y_label: "백만불".into(),
        series: vec![
            Series {
                label: "전체 산업".into(),
                style: SeriesStyle {
                    color: TOTAL_COLOR,
                    opacity: 0.7,
                    stroke_width: 1,
                    markers: false,
                    fill_opacity: None,
                },
                points: table.column_points(total_idx),
            },
            Series {
                label: "섬유 산업".into(),
                style: SeriesStyle {
                    color: INDUSTRY_COLOR,
                    opacity: 1.0,
                    stroke_width: 3,
                    markers: false,
                    fill_opacity: Some(0.1),
                },
                points: table.column_points(industry_idx),
            },
        ],
        include_zero: true,
        show_legend: true,
    })
}
