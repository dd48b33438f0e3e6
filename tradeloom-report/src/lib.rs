//! Tradeloom Report: static renderings of the trade dashboard.
//!
//! Builds on `tradeloom-core` to provide:
//! - SVG charts drawn with plotters
//! - a self-contained HTML page with cards, charts and the raw table
//! - a Markdown summary
//! - file export of both

use std::path::PathBuf;

use thiserror::Error;
use tradeloom_core::data::ParseError;

pub mod export;
pub mod html;
pub mod markdown;
pub mod svg;

pub use export::{write_report, ReportFormat};
pub use html::HtmlReportGenerator;
pub use markdown::MarkdownReportGenerator;

/// Errors from rendering or writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart has no data points")]
    EmptyChart,

    #[error("chart years {first}..={last} are outside the supported range")]
    YearOutOfRange { first: i32, last: i32 },

    #[error("chart drawing failed: {0}")]
    Draw(String),

    #[error(transparent)]
    Data(#[from] ParseError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
