use async_trait::async_trait;

use crate::{Document, EmbeddingError, MetadataMode};

/// An embedding model that turns text into vectors.
#[async_trait]
pub trait Embedding: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn dimension(&self) -> usize;

    /// Embeds the document as rendered for [`MetadataMode::Embed`], so metadata the
    /// document's formatter excludes from embeddings never reaches the model.
    async fn embed_document(&self, document: &Document) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(&document.formatted_content_with(MetadataMode::Embed))
            .await
    }
}
