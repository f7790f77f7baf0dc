use std::collections::HashMap;
use std::sync::Arc;

use ragdoc_core::{Document, MetadataFilter, SearchResult, StoreError, VectorStore};
use tokio::sync::RwLock;

#[derive(Default)]
struct StoreInner {
    docs: HashMap<String, Document>,
    dimension: Option<usize>,
}

/// Vector store kept entirely in memory. Documents are keyed by id; adding a document
/// whose id is already present replaces it.
///
/// `add` is all-or-nothing: a batch with a missing or mismatched embedding leaves the
/// store untouched. The dimension is fixed by the first stored document and released
/// again once the store is empty.
#[derive(Clone, Default)]
pub struct InMemoryVectorStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.docs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn get(&self, id: &str) -> Option<Document> {
        self.inner.read().await.docs.get(id).cloned()
    }
}

/// Checks every embedding in the batch against `stored` (or the batch's first one).
fn batch_dimension(docs: &[Document], stored: Option<usize>) -> Result<Option<usize>, StoreError> {
    let mut expected = stored;
    for doc in docs {
        let dimension = doc.embedding().len();
        if dimension == 0 {
            return Err(StoreError::MissingEmbedding {
                id: doc.id().to_string(),
            });
        }
        match expected {
            Some(expected) if expected != dimension => {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    got: dimension,
                });
            }
            None => expected = Some(dimension),
            _ => {}
        }
    }
    Ok(expected)
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let dimension = batch_dimension(&docs, inner.dimension)?;

        inner.dimension = dimension;
        for doc in docs {
            if inner.docs.contains_key(doc.id()) {
                tracing::debug!(document_id = %doc.id(), "replacing stored document");
            }
            inner.docs.insert(doc.id().to_string(), doc);
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let inner = self.inner.read().await;
        let expected = inner.dimension.unwrap_or(query_embedding.len());
        if expected != query_embedding.len() {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: query_embedding.len(),
            });
        }

        let mut scored = Vec::new();
        for doc in inner.docs.values() {
            if let Some(filter) = filter {
                if !filter.matches(doc.metadata()) {
                    continue;
                }
            }
            let mut score = cosine_similarity(query_embedding, doc.embedding());
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            let mut result_doc = doc.clone();
            result_doc.set_embedding(Vec::new());
            scored.push(SearchResult {
                document: result_doc,
                score,
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document.id().cmp(b.document.id()))
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for id in ids {
            inner.docs.remove(id);
        }
        if inner.docs.is_empty() {
            inner.dimension = None;
        }
        Ok(())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
