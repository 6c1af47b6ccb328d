//! Text extraction from supported file formats

use crate::error::{Result, ResumeGptError};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeGptError::Io)?;
        Ok(content)
    }
}

/// Extracts PDF text page by page, preserving reading order.
///
/// Each page's text fragments are joined with single spaces and pages are
/// joined with newlines, so downstream prompts see one line per page.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeGptError::Io)?;
        extract_pdf_text(&bytes).map_err(|e| {
            ResumeGptError::ExtractionFailed(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

fn extract_pdf_text(bytes: &[u8]) -> std::result::Result<String, lopdf::Error> {
    let doc = lopdf::Document::load_mem(bytes)?;

    let mut pages = Vec::new();
    // get_pages() is keyed by 1-based page number in a BTreeMap, so
    // iteration order is document order
    for page_number in doc.get_pages().keys() {
        let page_text = doc.extract_text(&[*page_number])?;
        pages.push(normalize_fragments(&page_text));
    }

    Ok(join_pages(pages))
}

/// Collapse intra-page fragment breaks into single spaces
fn normalize_fragments(page_text: &str) -> String {
    page_text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_pages(pages: Vec<String>) -> String {
    pages.join("\n")
}
