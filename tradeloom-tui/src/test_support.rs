//! Fixtures shared by the unit tests.

use std::path::{Path, PathBuf};

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use tradeloom_core::{DashboardConfig, TrackedColumns};

use crate::app::AppState;
use crate::ui;

pub const CSV: &str = "year,export,export_yoy,import,import_yoy,balance,share,total
2023,12400,-3.9,9400,-5.1,3000,2.0,632226
2024,12000,-3.2,9500,1.1,2500,7.8,683800
";

pub fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("trade.csv");
    std::fs::write(&path, CSV).unwrap();
    path
}

pub fn config_for(path: &Path) -> DashboardConfig {
    DashboardConfig {
        data_path: path.to_path_buf(),
        encoding: "utf-8".into(),
        year_column: "year".into(),
        columns: TrackedColumns {
            export: "export".into(),
            export_yoy: "export_yoy".into(),
            import: "import".into(),
            import_yoy: "import_yoy".into(),
            balance: "balance".into(),
            export_share: "share".into(),
            total_export: "total".into(),
        },
        ..DashboardConfig::default()
    }
}

/// Draw the whole UI into an in-memory terminal.
pub fn draw(app: &AppState, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal.backend().buffer().clone()
}

/// Buffer contents row by row. Wide glyphs leave a padding cell behind them.
pub fn text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
