use ragdoc_core::Document;

use crate::RetrievalResult;

pub const PARENT_DOCUMENT_ID_KEY: &str = "parent_document_id";
pub const CHUNK_INDEX_KEY: &str = "chunk_index";

/// Fixed-size character splitter with overlap.
///
/// Chunks produced from a document inherit its metadata, plus the parent id and the
/// chunk position. Each chunk gets a fresh random id.
#[derive(Clone, Debug)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    copy_content_formatter: bool,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            copy_content_formatter: true,
        }
    }

    /// Whether chunks keep the parent's content formatter (default) or fall back to
    /// the shared default formatter.
    pub fn copy_content_formatter(mut self, value: bool) -> Self {
        self.copy_content_formatter = value;
        self
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let chars: Vec<char> = text.chars().collect();
        let max_overlap = self.chunk_size.saturating_sub(1);
        let clamped_overlap = self.chunk_overlap.min(max_overlap);
        let step = (self.chunk_size - clamped_overlap).max(1);

        while start < chars.len() {
            let end = usize::min(start + self.chunk_size, chars.len());
            let chunk: String = chars[start..end].iter().collect();
            chunks.push(chunk);

            if end == chars.len() {
                break;
            }

            start = start.saturating_add(step);
        }

        chunks
    }

    pub fn split_documents(&self, docs: &[Document]) -> RetrievalResult<Vec<Document>> {
        let mut out = Vec::new();
        for parent in docs {
            for (index, chunk) in self.split_text(parent.content()).into_iter().enumerate() {
                let mut builder = Document::builder()
                    .content(chunk)
                    .metadata(parent.metadata().clone())
                    .metadata_entry(PARENT_DOCUMENT_ID_KEY, parent.id())
                    .metadata_entry(CHUNK_INDEX_KEY, index as u64);
                if self.copy_content_formatter {
                    builder = builder.content_formatter(parent.content_formatter().clone());
                }
                out.push(builder.build()?);
            }
        }
        tracing::debug!(parents = docs.len(), chunks = out.len(), "split documents");
        Ok(out)
    }
}
