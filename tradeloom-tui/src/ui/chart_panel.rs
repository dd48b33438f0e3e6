//! Line charts drawn with braille markers.
//!
//! Shaded areas become dim vertical bars down to the axis; markers become a
//! dot scatter on top of the line.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use tradeloom_core::chart::{ChartSpec, Series};
use tradeloom_core::format;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", spec.title))
        .title_style(theme::accent_bold());

    match (spec.x_bounds(), spec.y_bounds()) {
        (Some(x), Some(y)) => render_chart(f, area, spec, block, x, y),
        _ => {
            let text = Paragraph::new(Line::from(Span::styled("No data points.", theme::muted())))
                .block(block);
            f.render_widget(text, area);
        }
    }
}

fn to_points(series: &Series) -> Vec<(f64, f64)> {
    series
        .points
        .iter()
        .map(|&(year, value)| (f64::from(year), value))
        .collect()
}

fn line_style(series: &Series) -> Style {
    let style = Style::default().fg(theme::series_color(series.style.color));
    if series.style.opacity < 1.0 {
        style.add_modifier(Modifier::DIM)
    } else if series.style.stroke_width >= 3 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    spec: &ChartSpec,
    block: Block,
    (x0, x1): (i32, i32),
    (y0, y1): (f64, f64),
) {
    let points: Vec<Vec<(f64, f64)>> = spec.series.iter().map(to_points).collect();

    let mut datasets = Vec::new();
    for (series, data) in spec.series.iter().zip(points.iter()) {
        let color = theme::series_color(series.style.color);

        if series.style.fill_opacity.is_some() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Bar)
                    .style(Style::default().fg(color).add_modifier(Modifier::DIM))
                    .data(data),
            );
        }

        let mut line = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(line_style(series))
            .data(data);
        if spec.show_legend {
            line = line.name(series.label.clone());
        }
        datasets.push(line);

        if series.style.markers {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color))
                    .data(data),
            );
        }
    }

    let (x_min, x_max) = (f64::from(x0) - 0.5, f64::from(x1) + 0.5);
    let mid = ((i64::from(x0) + i64::from(x1)) / 2) as i32;
    let mut x_labels = vec![Span::styled(x0.to_string(), theme::muted())];
    if mid != x0 && mid != x1 {
        x_labels.push(Span::styled(mid.to_string(), theme::muted()));
    }
    if x1 != x0 {
        x_labels.push(Span::styled(x1.to_string(), theme::muted()));
    }

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([y0, y1])
                .labels(vec![
                    Span::styled(format::thousands(y0), theme::muted()),
                    Span::styled(format::thousands((y0 + y1) / 2.0), theme::muted()),
                    Span::styled(format::thousands(y1), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
