use pulldown_cmark::{html, Event, Options, Parser};

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Markdown to HTML for the live preview pane.
///
/// Raw HTML in the source is shown as text, never injected.
pub(crate) fn render_preview(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let out = render_preview("# Title\n\nSome **bold** text.");
        assert!(out.contains("<h1>Title</h1>"));
        assert!(out.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_renders_tables_and_tasks() {
        let out = render_preview(crate::editor::format::TABLE_TEMPLATE);
        assert!(out.contains("<table>"));

        let out = render_preview("- [ ] todo\n");
        assert!(out.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_preview("<script>alert(1)</script>\n\ninline <b>x</b>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<b>"));
    }
}
