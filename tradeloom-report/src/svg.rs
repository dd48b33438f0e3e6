//! SVG rendering of chart specs with plotters.

use plotters::prelude::*;

use tradeloom_core::chart::{ChartSpec, Rgb};
use tradeloom_core::data::YEARS;
use tradeloom_core::font::FontChoice;
use tradeloom_core::format;

use crate::RenderError;

/// Pixel size of a rendered chart.
pub const CHART_SIZE: (u32, u32) = (1200, 500);

const MARKER_RADIUS: i32 = 5;

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Draw `spec` into an SVG document string. Text uses `font.family`.
pub fn render_chart(spec: &ChartSpec, font: &FontChoice, size: (u32, u32)) -> Result<String, RenderError> {
    let (x0, x1) = spec.x_bounds().ok_or(RenderError::EmptyChart)?;
    if !YEARS.contains(&x0) || !YEARS.contains(&x1) {
        return Err(RenderError::YearOutOfRange { first: x0, last: x1 });
    }
    let (y0, y1) = spec.y_bounds().ok_or(RenderError::EmptyChart)?;
    let family = font.family.as_str();

    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, (family, 22))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((x0 - 1)..(x1 + 1), y0..y1)
            .map_err(draw_err)?;

        let year_labels = ((x1 - x0 + 3) as usize).min(14);
        chart
            .configure_mesh()
            .x_labels(year_labels)
            .x_label_formatter(&|x| x.to_string())
            .y_label_formatter(&|y| format::thousands(*y))
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .label_style((family, 13))
            .axis_desc_style((family, 15))
            .light_line_style(RGBColor(236, 236, 236))
            .draw()
            .map_err(draw_err)?;

        for series in &spec.series {
            let color = rgb(series.style.color);
            let line = color.mix(series.style.opacity).stroke_width(series.style.stroke_width);

            if let Some(alpha) = series.style.fill_opacity {
                let baseline = 0.0_f64.clamp(y0, y1);
                chart
                    .draw_series(AreaSeries::new(
                        series.points.iter().copied(),
                        baseline,
                        color.mix(alpha),
                    ))
                    .map_err(draw_err)?;
            }

            let drawn = chart
                .draw_series(LineSeries::new(series.points.iter().copied(), line))
                .map_err(draw_err)?;
            if spec.show_legend {
                drawn
                    .label(series.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], line));
            }

            if series.style.markers {
                chart
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|&p| Circle::new(p, MARKER_RADIUS, color.filled())),
                    )
                    .map_err(draw_err)?;
            }
        }

        if spec.show_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .label_font((family, 14))
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }

    Ok(out)
}
