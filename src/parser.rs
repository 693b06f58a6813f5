use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::block::Block;
use crate::inline::resolve_bold;

static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[\s\x{FEFF}]").unwrap());

/// Parse a model response into a list of blocks
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut table = TableState::default();

    for line in text.split('\n') {
        process_line(trim(line), &mut table, &mut blocks);
    }
    table.finish(&mut blocks);

    blocks
}

/// Table accumulation between the first table row and the next non-table line.
#[derive(Debug, Default)]
enum TableState {
    #[default]
    Idle,
    Accumulating {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl TableState {
    fn push_line(&mut self, line: &str) {
        match self {
            TableState::Idle => {
                *self = TableState::Accumulating {
                    headers: split_cells(line),
                    rows: Vec::new(),
                };
            }
            TableState::Accumulating { rows, .. } => {
                // Alignment row
                if !line.contains("---") {
                    rows.push(split_cells(line));
                }
            }
        }
    }

    /// Emit the pending table if it is complete and go back to idle.
    fn finish(&mut self, blocks: &mut Vec<Block>) {
        let TableState::Accumulating { headers, rows } = std::mem::take(self) else {
            return;
        };
        if headers.is_empty() || rows.is_empty() {
            debug!(
                headers = headers.len(),
                rows = rows.len(),
                "dropping incomplete table"
            );
            return;
        }
        blocks.push(Block::Table { headers, rows });
    }
}

fn process_line(line: &str, table: &mut TableState, blocks: &mut Vec<Block>) {
    if is_table_row(line) {
        table.push_line(line);
        return;
    }

    table.finish(blocks);

    if let Some(text) = line.strip_prefix("# ") {
        blocks.push(heading(1, text));
    } else if let Some(text) = line.strip_prefix("## ") {
        blocks.push(heading(2, text));
    } else if let Some(text) = line.strip_prefix("### ") {
        blocks.push(heading(3, text));
    } else if let Some(text) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        blocks.push(Block::ListItem {
            ordered: false,
            content: resolve_bold(text),
        });
    } else if let Some(prefix) = ORDERED_ITEM_RE.find(line) {
        blocks.push(Block::ListItem {
            ordered: true,
            content: resolve_bold(&line[prefix.end()..]),
        });
    } else if !line.is_empty() {
        blocks.push(Block::Paragraph {
            content: resolve_bold(line),
        });
    }
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
    }
}

/// Whitespace trim that also strips byte order marks.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn is_table_row(line: &str) -> bool {
    line.starts_with('|') && line.ends_with('|')
}

/// Split `| a | b |` into trimmed cells, dropping the outer empty segments.
fn split_cells(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments[1..segments.len() - 1]
        .iter()
        .map(|cell| trim(cell).to_string())
        .collect()
}
