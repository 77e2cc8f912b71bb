//! Markdown-to-HTML boundary for the preview pane. One thin library call;
//! everything interesting about markdown lives in pulldown-cmark.

use pulldown_cmark::{html, Options, Parser};

pub(crate) fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
