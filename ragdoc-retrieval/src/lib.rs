mod base_retriever;
mod error;
mod hash_embedder;
mod in_memory;
mod indexer;
mod retriever;
mod splitter;
mod transformer;

pub use base_retriever::BaseRetriever;
pub use error::{RetrievalError, RetrievalResult};
pub use hash_embedder::HashEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use indexer::Indexer;
pub use retriever::Retriever;
pub use splitter::{TextSplitter, CHUNK_INDEX_KEY, PARENT_DOCUMENT_ID_KEY};
pub use transformer::ContentFormatTransformer;
