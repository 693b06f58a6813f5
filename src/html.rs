//! HTML rendering of parsed blocks.
//!
//! All model text goes through maud's escaping, so a response can never
//! inject markup into the page.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::block::{Block, Span};

const STYLE: &str = "\
body { margin: 0; background: #f3f4f6; font-family: system-ui, sans-serif; color: #374151; }
.report { max-width: 56rem; margin: 2rem auto; padding: 2rem; background: #fff; border-radius: 0.5rem; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
.report h1 { font-size: 1.875rem; font-weight: 700; color: #111827; padding-bottom: 0.5rem; border-bottom: 2px solid #6366f1; }
.report h2 { font-size: 1.5rem; font-weight: 600; color: #111827; margin-top: 1.5rem; }
.report h3 { font-size: 1.25rem; font-weight: 600; color: #1f2937; margin-top: 1.25rem; }
.list-disc { list-style-type: disc; padding-left: 1.25rem; }
.list-decimal { list-style-type: decimal; padding-left: 1.25rem; }
.font-semibold { font-weight: 600; color: #111827; }
.table-wrapper { overflow-x: auto; margin: 1rem 0; }
.table-wrapper table { min-width: 100%; border-collapse: collapse; border: 1px solid #d1d5db; }
.table-wrapper thead { background: #f3f4f6; }
.table-wrapper th { padding: 0.75rem 1.5rem; text-align: left; font-size: 0.75rem; font-weight: 500; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; }
.table-wrapper td { padding: 1rem 1.5rem; font-size: 0.875rem; color: #1f2937; border-top: 1px solid #e5e7eb; }
.table-wrapper tbody tr:hover { background: #f9fafb; }
";

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block]) -> String {
    render_blocks(blocks).into_string()
}

/// Wrap rendered blocks in a complete standalone page.
pub fn page(title: &str, blocks: &[Block]) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="report" {
                    (render_blocks(blocks))
                }
            }
        }
    }
    .into_string()
}

fn render_blocks(blocks: &[Block]) -> Markup {
    let mut parts = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        if let Block::ListItem { ordered, .. } = &blocks[i] {
            // Gather the run of items of the same kind into one list
            let start = i;
            while i < blocks.len()
                && matches!(&blocks[i], Block::ListItem { ordered: o, .. } if o == ordered)
            {
                i += 1;
            }
            parts.push(list(*ordered, &blocks[start..i]));
            continue;
        }
        parts.push(block(&blocks[i]));
        i += 1;
    }

    html! {
        @for part in parts {
            (part)
        }
    }
}

fn block(block: &Block) -> Markup {
    match block {
        Block::Heading { level, text } => match level {
            1 => html! { h1 { (text) } },
            2 => html! { h2 { (text) } },
            _ => html! { h3 { (text) } },
        },
        Block::ListItem { ordered, .. } => list(*ordered, std::slice::from_ref(block)),
        Block::Paragraph { content } => html! { p { (spans(content)) } },
        Block::Table { headers, rows } => {
            if !block.is_renderable() {
                return html! {};
            }
            table(headers, rows)
        }
    }
}

fn list(ordered: bool, items: &[Block]) -> Markup {
    let items = html! {
        @for item in items {
            @if let Block::ListItem { content, .. } = item {
                li { (spans(content)) }
            }
        }
    };
    if ordered {
        html! { ol class="list-decimal" { (items) } }
    } else {
        html! { ul class="list-disc" { (items) } }
    }
}

fn table(headers: &[String], rows: &[Vec<String>]) -> Markup {
    html! {
        div class="table-wrapper" {
            table {
                thead {
                    tr {
                        @for header in headers {
                            th { (header) }
                        }
                    }
                }
                tbody {
                    @for row in rows {
                        tr {
                            @for cell in row {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn spans(content: &[Span]) -> Markup {
    html! {
        @for span in content {
            @match span {
                Span::Text(text) => { (text) }
                Span::Bold(text) => { strong class="font-semibold" { (text) } }
            }
        }
    }
}
