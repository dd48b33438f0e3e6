//! Markdown report generator.

use chrono::NaiveDateTime;

use tradeloom_core::dashboard::{caption, Dashboard, DashboardView};
use tradeloom_core::{format, table_view};

pub struct MarkdownReportGenerator {
    pub generated_at: NaiveDateTime,
}

impl MarkdownReportGenerator {
    pub fn generate(&self, view: &DashboardView) -> String {
        let mut report = String::from("# 대한민국 섬유산업 수출입 동향\n\n");

        let dashboard = match view {
            DashboardView::Ready(d) => d,
            DashboardView::Failed(banner) => {
                report.push_str(&format!("> {}\n\n", banner.message));
                report.push_str(&format!("_{}_\n", caption(self.generated_at)));
                return report;
            }
        };

        report.push_str(&format!(
            "Data fingerprint: `{}`\n\n## {}년 요약\n\n",
            dashboard.short_fingerprint(),
            dashboard.cards[0].year
        ));
        report.push_str("| 항목 | 값 | 변화 |\n");
        report.push_str("|------|----|------|\n");
        for card in &dashboard.cards {
            let change = if card.indicator.is_delta() {
                format!("{} (전년비)", card.indicator.text())
            } else {
                card.indicator.text()
            };
            report.push_str(&format!(
                "| {} | {} | {} |\n",
                card.heading(),
                card.value_text,
                change
            ));
        }

        report.push_str("\n## 원본 데이터\n\n");
        report.push_str(&table_markdown(dashboard));
        report.push_str(&format!("\n_{}_\n", caption(self.generated_at)));
        report
    }
}

/// Pipes would end the cell early.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn table_markdown(dashboard: &Dashboard) -> String {
    let header: Vec<String> = table_view::header(&dashboard.table)
        .into_iter()
        .map(escape_cell)
        .collect();
    let mut out = format!("| {} |\n", header.join(" | "));
    out.push_str(&format!("|{}\n", "---|".repeat(header.len())));

    for record in dashboard.rows_descending() {
        out.push_str(&format!("| {}", record.year));
        for value in &record.values {
            out.push_str(&format!(" | {}", format::cell(*value)));
        }
        out.push_str(" |\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tradeloom_core::dashboard::{build, ErrorBanner, ErrorKind, Selection};
    use tradeloom_core::data::{Table, TradeRecord};
    use tradeloom_core::TrackedColumns;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn view() -> DashboardView {
        let tracked = TrackedColumns {
            export: "export".into(),
            export_yoy: "export_yoy".into(),
            import: "import".into(),
            import_yoy: "import_yoy".into(),
            balance: "balance".into(),
            export_share: "share".into(),
            total_export: "total".into(),
        };
        let columns = ["export", "export_yoy", "import", "import_yoy", "balance", "share", "total"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = Table::new(
            "연도",
            columns,
            vec![
                TradeRecord::new(2023, vec![Some(12400.0), Some(1.0), Some(9400.0), None, Some(3000.0), Some(8.1), Some(600000.0)]),
                TradeRecord::new(2024, vec![Some(12000.0), Some(-3.2), Some(9500.0), Some(1.1), Some(2500.0), Some(7.8), Some(620000.0)]),
            ],
        );
        DashboardView::Ready(Box::new(build(table, &Selection::default(), &tracked, 5).unwrap()))
    }

    #[test]
    fn summary_rows() {
        let md = MarkdownReportGenerator { generated_at: now() }.generate(&view());
        assert!(md.contains("## 2024년 요약"));
        assert!(md.contains("| 🧶 섬유 수출액 | 12,000 M$ | ▼3.2% (전년비) |"));
        assert!(md.contains("| 📉 섬유 수입액 | 9,500 M$ | ▲1.1% (전년비) |"));
        assert!(md.contains("| 💰 섬유 무역수지 | 2,500 M$ | share: 7.8% |"));
    }

    #[test]
    fn table_newest_first_with_blank_cells() {
        let md = MarkdownReportGenerator { generated_at: now() }.generate(&view());
        assert!(md.contains("| 연도 | export | export_yoy |"));
        let newer = md.find("| 2024 | 12000 |").unwrap();
        let older = md.find("| 2023 | 12400 | 1 | 9400 |  | 3000 |").unwrap();
        assert!(newer < older);
        assert!(md.trim_end().ends_with("데이터 출처: 산업통상자원부_"));
    }

    #[test]
    fn pipes_in_column_names_are_escaped() {
        let tracked = TrackedColumns {
            export: "export".into(),
            export_yoy: "export_yoy".into(),
            import: "import".into(),
            import_yoy: "import_yoy".into(),
            balance: "수출|수입".into(),
            export_share: "share".into(),
            total_export: "total".into(),
        };
        let columns = ["export", "export_yoy", "import", "import_yoy", "수출|수입", "share", "total"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = Table::new(
            "연도",
            columns,
            vec![TradeRecord::new(2024, vec![Some(12000.0), Some(-3.2), Some(9500.0), Some(1.1), Some(2500.0), Some(7.8), Some(620000.0)])],
        );
        let view = DashboardView::Ready(Box::new(build(table, &Selection::default(), &tracked, 5).unwrap()));
        let md = MarkdownReportGenerator { generated_at: now() }.generate(&view);

        assert!(md.contains("| import_yoy | 수출\\|수입 | share |"));
        assert!(md.contains("|---|---|---|---|---|---|---|---|\n| 2024 |"));
    }

    #[test]
    fn failure_is_quoted_banner() {
        let view = DashboardView::Failed(ErrorBanner {
            kind: ErrorKind::Processing,
            message: "❌ 예상치 못한 오류가 발생했습니다: boom".into(),
        });
        let md = MarkdownReportGenerator { generated_at: now() }.generate(&view);
        assert!(md.contains("> ❌ 예상치 못한 오류가 발생했습니다: boom"));
        assert!(!md.contains("요약"));
    }
}
