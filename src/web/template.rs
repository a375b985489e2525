//! Embedded HTML template for the two-pane page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Render the index page.
pub fn render_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_both_panes() {
        let Html(html) = render_index();
        assert!(html.contains("PDF 미리보기"));
        assert!(html.contains("PDF 요약"));
        assert!(html.contains("type=\"password\""));
    }
}
