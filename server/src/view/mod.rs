//! Server-rendered dashboard pages
//!
//! Both layouts draw the same form and the same results; they only differ in
//! where the form sits.

pub mod chart;
pub mod form;
pub mod results;

use axum::http::StatusCode;
use parkinson_core::{Detection, FeatureRecord};

use crate::config::DashboardLayout;

/// Stylesheet inlined into every page
const DASHBOARD_CSS: &str = include_str!("../../templates/dashboard.css");

pub const PAGE_TITLE: &str = "Parkinson's Disease Prediction Dashboard";

/// Everything one dashboard render needs
pub struct DashboardView<'a> {
    pub layout: DashboardLayout,
    /// Values the form controls show
    pub record: &'a FeatureRecord,
    pub detection: Option<&'a Detection>,
    pub top: usize,
}

impl DashboardView<'_> {
    pub fn render(&self) -> String {
        let controls = form::render_form(self.record);
        let results = self
            .detection
            .map(|d| results::render_results(d, self.top))
            .unwrap_or_default();

        let body = match self.layout {
            DashboardLayout::Main => format!(
                r#"<main class="main-panel">
{}
{}
{}
{}
</main>"#,
                header(),
                controls,
                results,
                footer()
            ),
            DashboardLayout::Sidebar => format!(
                r#"<aside class="sidebar">
{}
</aside>
<main class="main-panel">
{}
{}
{}
</main>"#,
                controls,
                header(),
                results,
                footer()
            ),
        };

        page(&body)
    }
}

/// Error page for the dashboard routes
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<main class="main-panel">
{}
<div class="error-box">
    <h3>{} {}</h3>
    <p>{}</p>
    <p><a href="/">Back to the dashboard</a></p>
</div>
{}
</main>"#,
        header(),
        status.as_u16(),
        escape_html(status.canonical_reason().unwrap_or("Error")),
        escape_html(message),
        footer()
    );
    page(&body)
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Parkinson&#39;s Disease Prediction</title>
    <style>
{}
    </style>
</head>
<body>
<div class="app">
{}
</div>
</body>
</html>"#,
        DASHBOARD_CSS, body
    )
}

fn header() -> String {
    format!(
        r#"<h1>🧠 {}</h1>
<p class="subtitle">Predict the likelihood of Parkinson&#39;s Disease using patient-specific features.</p>"#,
        escape_html(PAGE_TITLE)
    )
}

fn footer() -> String {
    format!(
        r#"<p class="footer">🔬 Predictions explained with TreeSHAP | 💡 v{}</p>"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b class="x">Tom & Jerry's</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape_html("UPDRS"), "UPDRS");
    }

    #[test]
    fn test_layouts_place_form_differently() {
        let record = FeatureRecord::defaults();
        let main = DashboardView {
            layout: DashboardLayout::Main,
            record: &record,
            detection: None,
            top: 10,
        }
        .render();
        assert!(!main.contains(r#"<aside class="sidebar">"#));
        assert!(main.contains("patient-form"));

        let sidebar = DashboardView {
            layout: DashboardLayout::Sidebar,
            record: &record,
            detection: None,
            top: 10,
        }
        .render();
        let aside = sidebar.find(r#"<aside class="sidebar">"#).unwrap();
        let form = sidebar.find("patient-form").unwrap();
        let main_panel = sidebar.find(r#"<main class="main-panel">"#).unwrap();
        assert!(aside < form && form < main_panel);
    }

    #[test]
    fn test_no_results_without_detection() {
        let record = FeatureRecord::defaults();
        let html = DashboardView {
            layout: DashboardLayout::Main,
            record: &record,
            detection: None,
            top: 10,
        }
        .render();
        assert!(html.contains("Parkinson&#39;s Disease Prediction Dashboard"));
        assert!(!html.contains("Prediction Confidence"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page(StatusCode::BAD_REQUEST, "<script>UPDRS</script>");
        assert!(html.contains("400 Bad Request"));
        assert!(html.contains("&lt;script&gt;UPDRS&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
