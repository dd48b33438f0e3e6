//! Self-contained HTML dashboard page.
//!
//! Every trend chart is rendered up front and inlined as SVG; a `<select>`
//! and a checkbox switch between them with a few lines of script. The page
//! needs no server and no network access.
//!
//! The template is filled with `str::replace` rather than `format!` because
//! the CSS and script contain braces.

use base64::Engine as _;
use chrono::NaiveDateTime;
use tracing::debug;

use tradeloom_core::cards::{SummaryCard, Tone};
use tradeloom_core::chart::{comparison_chart, trend_chart, ChartSpec};
use tradeloom_core::dashboard::{caption, Dashboard, DashboardView, ErrorBanner};
use tradeloom_core::font::FontChoice;
use tradeloom_core::{format, table_view, TrackedColumns};

use crate::svg::{render_chart, CHART_SIZE};
use crate::RenderError;

pub const PAGE_TITLE: &str = "섬유산업 대시보드";

const TEMPLATE: &str = r#"<!doctype html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>🧵 __PAGE_TITLE__</title>
<style>
__FONT_FACE__
  body { font-family: __FONT_FAMILY__; margin: 0; color: #222; background: #fafafa; }
  .container { display: flex; min-height: 100vh; }
  .sidebar { width: 300px; padding: 20px; border-right: 1px solid #ddd; background: #f0f2f6; }
  .main { flex: 1; padding: 24px 32px; }
  .cards { display: flex; gap: 20px; margin: 20px 0; }
  .main-card { flex: 1; background: #fff; border-radius: 15px; padding: 25px; text-align: center;
               box-shadow: 0 4px 6px rgba(0,0,0,0.1); border: 1px solid #eee; }
  .card-title { font-size: 16px; color: #555; margin-bottom: 10px; font-weight: bold; }
  .card-value { font-size: 28px; font-weight: 800; }
  .card-delta { font-size: 15px; margin-top: 8px; font-weight: 600; }
  figure { margin: 0; }
  figure svg { width: 100%; height: auto; }
  .muted { color: #777; font-size: 13px; }
  .note { color: #a15c00; font-size: 13px; }
  .banner { padding: 16px; border-radius: 8px; background: #ffecec; color: #b00020; border: 1px solid #f5c2c7; }
  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; font-size: 14px; }
  th { background: #fff; border-bottom: 1px solid #ddd; text-align: left; }
  td.num { text-align: right; font-variant-numeric: tabular-nums; }
  footer { margin-top: 32px; color: #888; font-size: 12px; }
</style>
</head>
<body>
__BODY__
</body>
</html>
"#;

const SCRIPT: &str = r#"<script>
(function () {
  var select = document.getElementById('column');
  var compare = document.getElementById('compare');
  var comparison = document.getElementById('comparison');
  function update() {
    document.querySelectorAll('figure.trend').forEach(function (f) {
      f.hidden = f.dataset.column !== select.value;
    });
    if (comparison) comparison.hidden = !compare.checked;
  }
  select.addEventListener('change', update);
  if (compare) compare.addEventListener('change', update);
  update();
})();
</script>"#;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// CSS color for a card tone.
pub fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Warm => "#FF4B4B",
        Tone::Cool => "#1C83E1",
        Tone::Neutral => "#666666",
        Tone::Positive => "#2E8B57",
        Tone::Negative => "#CD5C5C",
        Tone::Accent => "#8A2BE2",
    }
}

fn font_format(data: &[u8]) -> (&'static str, &'static str) {
    match data.get(0..4) {
        Some(b"OTTO") => ("font/otf", "opentype"),
        Some(b"wOFF") => ("font/woff", "woff"),
        Some(b"wOF2") => ("font/woff2", "woff2"),
        _ => ("font/ttf", "truetype"),
    }
}

/// `@font-face` rule embedding a bundled font, empty for system fonts.
pub fn font_face(font: &FontChoice) -> String {
    let Some(data) = &font.data else {
        return String::new();
    };
    let (mime, format) = font_format(data);
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!(
        "  @font-face {{ font-family: '{}'; src: url(data:{mime};base64,{encoded}) format('{format}'); }}",
        font.family.replace('\'', "")
    )
}

/// Renders dashboards and error banners as standalone pages.
pub struct HtmlReportGenerator<'a> {
    pub font: &'a FontChoice,
    pub tracked: &'a TrackedColumns,
    pub generated_at: NaiveDateTime,
}

impl HtmlReportGenerator<'_> {
    pub fn generate(&self, view: &DashboardView) -> Result<String, RenderError> {
        match view {
            DashboardView::Ready(dashboard) => self.dashboard_page(dashboard),
            DashboardView::Failed(banner) => Ok(self.error_page(banner)),
        }
    }

    /// Page with only the title, the banner and the caption.
    pub fn error_page(&self, banner: &ErrorBanner) -> String {
        let mut body = String::from("<div class=\"main\">\n");
        body.push_str(&self.heading());
        body.push_str(&format!(
            "<div class=\"banner\" role=\"alert\">{}</div>\n",
            escape_html(&banner.message)
        ));
        body.push_str(&format!(
            "<footer>{}</footer>\n</div>",
            escape_html(&caption(self.generated_at))
        ));
        self.page(&body)
    }

    fn dashboard_page(&self, dashboard: &Dashboard) -> Result<String, RenderError> {
        // Prebuilt hidden so the toggle works offline. Left out when the
        // columns it needs are missing.
        let comparison = match &dashboard.comparison {
            Some(spec) => Some(spec.clone()),
            None => match comparison_chart(&dashboard.table, self.tracked) {
                Ok(spec) => Some(spec),
                Err(e) => {
                    debug!(error = %e, "comparison chart unavailable");
                    None
                }
            },
        };

        let mut body = String::from("<div class=\"container\">\n");
        body.push_str(&self.sidebar(dashboard, comparison.is_some()));
        body.push_str("<div class=\"main\">\n");
        body.push_str(&self.heading());

        if let Some(note) = self.font.note {
            body.push_str(&format!("<p class=\"note\">⚠️ {}</p>\n", escape_html(note)));
        }

        body.push_str("<div class=\"cards\">\n");
        for card in &dashboard.cards {
            body.push_str(&card_html(card));
        }
        body.push_str("</div>\n");

        body.push_str("<section id=\"trend\">\n");
        for column in dashboard.metric_columns() {
            let spec = trend_chart(&dashboard.table, column)?;
            body.push_str(&format!(
                "<figure class=\"trend\" data-column=\"{}\"{}>\n<h2>📈 {} 추이 분석</h2>\n{}\n</figure>\n",
                escape_html(column),
                if *column == dashboard.selected_column { "" } else { " hidden" },
                escape_html(column),
                self.chart_or_placeholder(&spec)?,
            ));
        }
        body.push_str("</section>\n");

        if let Some(comparison) = &comparison {
            body.push_str(&format!(
                "<section id=\"comparison\"{}>\n<hr>\n<h2>📊 {}</h2>\n{}\n</section>\n",
                if dashboard.comparison.is_some() { "" } else { " hidden" },
                escape_html(&comparison.title),
                self.chart_or_placeholder(comparison)?,
            ));
        }

        body.push_str(&table_html(dashboard));
        body.push_str(&format!(
            "<footer>{} | 데이터 지문: <code>{}</code></footer>\n",
            escape_html(&caption(self.generated_at)),
            dashboard.short_fingerprint()
        ));
        body.push_str("</div>\n</div>\n");
        body.push_str(SCRIPT);

        debug!(
            columns = dashboard.metric_columns().len(),
            bytes = body.len(),
            "rendered dashboard page"
        );
        Ok(self.page(&body))
    }

    fn page(&self, body: &str) -> String {
        TEMPLATE
            .replace("__PAGE_TITLE__", PAGE_TITLE)
            .replace("__FONT_FACE__", &font_face(self.font))
            .replace("__FONT_FAMILY__", &self.font.css_family())
            .replace("__BODY__", body)
    }

    fn heading(&self) -> String {
        "<h1>🧵 대한민국 섬유산업 수출입 동향 분석기</h1>\n\
<p>전체 산업 대비 섬유산업의 성장과 변화를 한눈에 확인해 보세요!</p>\n"
            .to_string()
    }

    fn sidebar(&self, dashboard: &Dashboard, comparison: bool) -> String {
        let mut html = String::from(
            "<aside class=\"sidebar\">\n<h2>⚙️ 분석 설정</h2>\n\
<p>그래프에 표시할 항목을 선택하세요.</p>\n\
<label for=\"column\">데이터 항목 선택</label><br>\n<select id=\"column\">\n",
        );
        for column in dashboard.metric_columns() {
            let escaped = escape_html(column);
            let selected = if *column == dashboard.selected_column { " selected" } else { "" };
            html.push_str(&format!("<option value=\"{escaped}\"{selected}>{escaped}</option>\n"));
        }
        html.push_str("</select>\n");
        if comparison {
            html.push_str("<hr>\n<p>💡 아래 체크박스를 누르면 전체 산업과의 비교 그래프가 나타납니다.</p>\n");
            html.push_str(&format!(
                "<label><input type=\"checkbox\" id=\"compare\"{}> 전체 산업과 비교하기</label>\n",
                if dashboard.comparison.is_some() { " checked" } else { "" }
            ));
        }
        html.push_str("</aside>\n");
        html
    }

    fn chart_or_placeholder(&self, spec: &ChartSpec) -> Result<String, RenderError> {
        match render_chart(spec, self.font, CHART_SIZE) {
            Ok(svg) => Ok(svg),
            Err(RenderError::EmptyChart) => Ok("<p class=\"muted\">표시할 데이터가 없습니다.</p>".into()),
            Err(e) => Err(e),
        }
    }
}

fn card_html(card: &SummaryCard) -> String {
    let indicator = if card.indicator.is_delta() {
        format!("{} (전년비)", card.indicator.text())
    } else {
        card.indicator.text()
    };
    format!(
        "<div class=\"main-card\">\n\
  <div class=\"card-title\">{}</div>\n\
  <div class=\"card-value\" style=\"color: {};\">{}</div>\n\
  <div class=\"card-delta\" style=\"color: {};\">{}</div>\n\
</div>\n",
        escape_html(&card.heading()),
        tone_color(card.value_tone),
        escape_html(&card.value_text),
        tone_color(card.indicator.tone()),
        escape_html(&indicator),
    )
}

fn table_html(dashboard: &Dashboard) -> String {
    let mut html = String::from("<details>\n<summary>📄 원본 데이터 확인하기</summary>\n<table>\n<tr>");
    for name in table_view::header(&dashboard.table) {
        html.push_str(&format!("<th>{}</th>", escape_html(name)));
    }
    html.push_str("</tr>\n");

    for record in dashboard.rows_descending() {
        html.push_str(&format!("<tr><td>{}</td>", record.year));
        for value in &record.values {
            html.push_str(&format!("<td class=\"num\">{}</td>", format::cell(*value)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</details>\n");
    html
}
