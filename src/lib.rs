mod block;
pub mod config;
mod error;
pub mod gemini;
mod html;
mod inline;
mod parser;
pub mod prompt;
pub mod request;
mod typst;

pub use block::{Block, Span};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use inline::resolve_bold;
pub use request::StrategyRequest;

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse a model response into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    let blocks = parser::parse(markdown);
    debug!(blocks = blocks.len(), "parsed response");
    blocks
}

/// Convert a model response to an escaped HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    html::blocks_to_html(&parse(markdown))
}

/// Convert a model response to a standalone HTML page.
pub fn markdown_to_html_page(markdown: &str, title: &str) -> String {
    html::page(title, &parse(markdown))
}

/// Convert a model response to Typst markup.
pub fn markdown_to_typst(markdown: &str) -> String {
    typst::blocks_to_typst(&parse(markdown))
}

/// Convert a model response to PDF bytes.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = markdown_to_typst(markdown);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("Typst compilation failed: {:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Typst(format!("PDF generation failed: {:?}", e)))
}

/// Render a model response in the given output format.
pub fn render(markdown: &str, format: OutputFormat, title: &str) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Markdown => markdown.as_bytes().to_vec(),
        OutputFormat::Html => markdown_to_html_page(markdown, title).into_bytes(),
        OutputFormat::Typst => markdown_to_typst(markdown).into_bytes(),
        OutputFormat::Pdf => markdown_to_pdf(markdown)?,
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_markdown_is_passthrough() {
        let md = "# Title\n| A |";
        assert_eq!(
            render(md, OutputFormat::Markdown, "t").unwrap(),
            md.as_bytes()
        );
    }

    #[test]
    fn render_html_is_a_page() {
        let html = render("# Title", OutputFormat::Html, "My Report").unwrap();
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("<title>My Report</title>"));
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn render_typst() {
        let typst = render("- a", OutputFormat::Typst, "t").unwrap();
        assert!(String::from_utf8(typst).unwrap().contains("- a\n"));
    }
}
