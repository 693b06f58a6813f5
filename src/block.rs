/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
}

/// Block-level elements parsed from a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level is always 1, 2 or 3. Heading text is never inline-resolved.
    Heading {
        level: u8,
        text: String,
    },
    ListItem {
        ordered: bool,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Block {
    /// Whether a table block has something to show. Other blocks always do.
    pub fn is_renderable(&self) -> bool {
        match self {
            Block::Table { headers, rows } => !headers.is_empty() && !rows.is_empty(),
            _ => true,
        }
    }
}
