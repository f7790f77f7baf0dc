use ragdoc_core::{Document, Embedding, MetadataMode, VectorStore};

use crate::RetrievalError;

/// Embeds documents and writes them to a vector store.
///
/// The text sent to the embedder is each document's rendering under
/// [`MetadataMode::Embed`], so keys its formatter excludes from embeddings stay out
/// of the vector.
pub struct Indexer<E, S> {
    embedder: E,
    store: S,
}

impl<E, S> Indexer<E, S>
where
    E: Embedding,
    S: VectorStore,
{
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }

    pub async fn index(&self, docs: Vec<Document>) -> Result<(), RetrievalError> {
        let texts: Vec<String> = docs
            .iter()
            .map(|doc| doc.formatted_content_with(MetadataMode::Embed))
            .collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != docs.len() {
            return Err(RetrievalError::EmbeddingCountMismatch {
                expected: docs.len(),
                got: embeddings.len(),
            });
        }

        tracing::debug!(count = docs.len(), "indexing documents");

        let docs_with_embeddings = docs
            .into_iter()
            .zip(embeddings)
            .map(|(mut doc, embedding)| {
                doc.set_embedding(embedding);
                doc
            })
            .collect();

        self.store.add(docs_with_embeddings).await?;
        Ok(())
    }
}
