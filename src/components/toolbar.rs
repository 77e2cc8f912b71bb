use leptos::prelude::*;

/// The markdown constructs the toolbar can wrap a selection in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MarkdownFormat {
    Bold,
    Italic,
    Heading,
    Link,
    Image,
    List,
    OrderedList,
    CodeBlock,
    InlineCode,
    Quote,
}

impl MarkdownFormat {
    pub fn apply(self, text: &str) -> String {
        match self {
            MarkdownFormat::Bold => format!("**{text}**"),
            MarkdownFormat::Italic => format!("*{text}*"),
            MarkdownFormat::Heading => format!("# {text}"),
            MarkdownFormat::Link => format!("[{text}](url)"),
            MarkdownFormat::Image => format!("![alt]({text})"),
            MarkdownFormat::List => format!("- {text}"),
            MarkdownFormat::OrderedList => format!("1. {text}"),
            MarkdownFormat::CodeBlock => format!("```\n{text}\n```"),
            MarkdownFormat::InlineCode => format!("`{text}`"),
            MarkdownFormat::Quote => format!("> {text}"),
        }
    }
}

const TOOLS: [(&str, &str, MarkdownFormat); 10] = [
    ("B", "Bold", MarkdownFormat::Bold),
    ("I", "Italic", MarkdownFormat::Italic),
    ("H", "Heading", MarkdownFormat::Heading),
    ("🔗", "Link", MarkdownFormat::Link),
    ("📷", "Image", MarkdownFormat::Image),
    ("•", "List", MarkdownFormat::List),
    ("1.", "Ordered List", MarkdownFormat::OrderedList),
    ("```", "Code Block", MarkdownFormat::CodeBlock),
    ("`", "Inline Code", MarkdownFormat::InlineCode),
    (">", "Quote", MarkdownFormat::Quote),
];

/// Replace `[start, end)` of `content` with the formatted selection and
/// return the new text plus the caret position just past the insertion.
///
/// The indices come from the textarea, so they are UTF-16 code units; the
/// splice happens in UTF-16 space to keep non-ASCII content intact.
pub(crate) fn apply_format(
    content: &str,
    start: usize,
    end: usize,
    format: MarkdownFormat,
) -> (String, usize) {
    let units: Vec<u16> = content.encode_utf16().collect();
    let start = start.min(units.len());
    let end = end.clamp(start, units.len());

    let selected = String::from_utf16_lossy(&units[start..end]);
    let formatted = format.apply(if selected.is_empty() { "text" } else { &selected });

    let mut out = String::from_utf16_lossy(&units[..start]);
    out.push_str(&formatted);
    out.push_str(&String::from_utf16_lossy(&units[end..]));

    let cursor = start + formatted.encode_utf16().count();
    (out, cursor)
}

#[component]
pub fn MarkdownToolbar(#[prop(into)] on_format: Callback<MarkdownFormat>) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center gap-1 border-b border-border bg-card px-2 py-1">
            {TOOLS
                .into_iter()
                .map(|(icon, title, format)| {
                    view! {
                        <button
                            class="min-w-8 rounded px-2 py-1 text-sm text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                            title=title
                            on:click=move |_| on_format.run(format)
                        >
                            {icon}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_wrap_the_selection() {
        assert_eq!(MarkdownFormat::Bold.apply("hi"), "**hi**");
        assert_eq!(MarkdownFormat::Link.apply("hi"), "[hi](url)");
        assert_eq!(MarkdownFormat::CodeBlock.apply("x"), "```\nx\n```");
    }

    #[test]
    fn test_apply_format_replaces_the_selected_range() {
        let (out, cursor) = apply_format("make this bold", 5, 9, MarkdownFormat::Bold);
        assert_eq!(out, "make **this** bold");
        assert_eq!(cursor, 13);
    }

    #[test]
    fn test_apply_format_inserts_placeholder_on_empty_selection() {
        let (out, cursor) = apply_format("ab", 1, 1, MarkdownFormat::Italic);
        assert_eq!(out, "a*text*b");
        assert_eq!(cursor, 7);
    }

    #[test]
    fn test_apply_format_counts_utf16_units_like_the_textarea() {
        // "日本" is 2 UTF-16 units; an emoji is a surrogate pair (2 units).
        let content = "日本 😀 end";
        let (out, _) = apply_format(content, 3, 5, MarkdownFormat::Bold);
        assert_eq!(out, "日本 **😀** end");
    }

    #[test]
    fn test_apply_format_clamps_out_of_range_indices() {
        let (out, _) = apply_format("ab", 10, 20, MarkdownFormat::InlineCode);
        assert_eq!(out, "ab`text`");
    }
}
