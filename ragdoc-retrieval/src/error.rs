use ragdoc_core::{DocumentError, EmbeddingError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedder returned {got} embeddings for {expected} documents")]
    EmbeddingCountMismatch { expected: usize, got: usize },
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
