//! Writing rendered reports to disk.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use tradeloom_core::dashboard::DashboardView;
use tradeloom_core::font::FontChoice;
use tradeloom_core::TrackedColumns;

use crate::html::HtmlReportGenerator;
use crate::markdown::MarkdownReportGenerator;
use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Markdown,
}

impl ReportFormat {
    /// Guess from the output extension; anything but `.md` is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => ReportFormat::Markdown,
            _ => ReportFormat::Html,
        }
    }
}

/// Render `view` in `format` and write it to `output`, creating parent
/// directories. Failed views are written too, as banner-only reports.
pub fn write_report(
    output: impl AsRef<Path>,
    format: ReportFormat,
    view: &DashboardView,
    font: &FontChoice,
    tracked: &TrackedColumns,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, RenderError> {
    let output = output.as_ref();
    let content = match format {
        ReportFormat::Html => HtmlReportGenerator {
            font,
            tracked,
            generated_at,
        }
        .generate(view)?,
        ReportFormat::Markdown => MarkdownReportGenerator { generated_at }.generate(view),
    };

    let write_err = |source| RenderError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(output, content).map_err(write_err)?;

    info!(path = %output.display(), ?format, "wrote report");
    Ok(output.to_path_buf())
}
