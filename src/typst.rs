use crate::block::{Block, Span};

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block]) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");

    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            Block::Heading { level, text } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(*level, text, &mut out);
                i += 1;
                if i < blocks.len() {
                    i = emit_block(blocks, i, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                i = emit_block(blocks, i, &mut out);
            }
        }
    }

    out
}

fn emit_heading(level: u8, text: &str, out: &mut String) {
    for _ in 0..level {
        out.push('=');
    }
    out.push(' ');
    escape_line_start(text, out);
    out.push_str("\n\n");
}

/// Emit the block at `i` and return the index of the next unemitted block.
fn emit_block(blocks: &[Block], i: usize, out: &mut String) -> usize {
    match &blocks[i] {
        Block::Heading { level, text } => {
            emit_heading(*level, text, out);
            i + 1
        }
        Block::ListItem { .. } => emit_list(blocks, i, out),
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
            i + 1
        }
        block @ Block::Table { headers, rows } => {
            if block.is_renderable() {
                // Keep tables together when possible
                out.push_str("#block(breakable: false)[\n");
                table_to_typst(headers, rows, out);
                out.push_str("]\n\n");
            }
            i + 1
        }
    }
}

/// Emit the run of list items starting at `start`, keeping short runs on one page.
fn emit_list(blocks: &[Block], start: usize, out: &mut String) -> usize {
    let end = blocks[start..]
        .iter()
        .position(|b| !matches!(b, Block::ListItem { .. }))
        .map_or(blocks.len(), |n| start + n);

    let keep_together = end - start <= 5;
    if keep_together {
        out.push_str("#block(breakable: false)[\n");
    }
    for block in &blocks[start..end] {
        if let Block::ListItem { ordered, content } = block {
            out.push_str(if *ordered { "+ " } else { "- " });
            spans_to_typst(content, out);
            out.push('\n');
        }
    }
    if keep_together {
        out.push_str("]\n\n");
    } else {
        out.push('\n');
    }

    end
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    let mut at_start = true;
    for span in spans {
        match span {
            Span::Text(text) if at_start => escape_line_start(text, out),
            Span::Text(text) => escape_into(text, out),
            Span::Bold(text) if text.is_empty() => continue,
            Span::Bold(text) => {
                out.push('*');
                escape_into(text, out);
                out.push('*');
            }
        }
        at_start = false;
    }
}

/// Escape text that opens a line or cell, where `12.` would start an enum item.
fn escape_line_start(text: &str, out: &mut String) {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &text[digits..];
    let is_marker = digits > 0
        && rest
            .strip_prefix('.')
            .is_some_and(|after| after.is_empty() || after.starts_with(char::is_whitespace));
    if is_marker {
        out.push_str(&text[..digits]);
        out.push_str("\\.");
        escape_into(&rest[1..], out);
    } else {
        escape_into(text, out);
    }
}

/// Escape characters that have meaning in Typst markup
fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '='
            | '+' | '-' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn table_to_typst(headers: &[String], rows: &[Vec<String>], out: &mut String) {
    // Model output is often ragged, so size the grid by the widest row
    let col_count = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Header cells (bold)
    for col in 0..col_count {
        match headers.get(col) {
            Some(cell) if !cell.is_empty() => {
                out.push_str("  [*");
                escape_line_start(cell, out);
                out.push_str("*],\n");
            }
            _ => out.push_str("  [],\n"),
        }
    }

    // Data rows
    for row in rows {
        for col in 0..col_count {
            out.push_str("  [");
            if let Some(cell) = row.get(col) {
                escape_line_start(cell, out);
            }
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}
