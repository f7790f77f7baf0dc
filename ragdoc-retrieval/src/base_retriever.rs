use async_trait::async_trait;
use ragdoc_core::{MetadataFilter, SearchResult};

use crate::error::RetrievalError;

/// Takes a query string and returns relevant documents, most relevant first.
#[async_trait]
pub trait BaseRetriever: Send + Sync {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, RetrievalError>;
}
