// Import commonly used types with: `use ragdoc_core::prelude::*;`

pub use crate::{
    ContentFormatter, DefaultContentFormatter, Document, DocumentBuilder, DocumentError,
    Embedding, IdGenerator, Media, MediaContent, Metadata, MetadataFilter, MetadataMode,
    RandomIdGenerator, SearchResult, Sha256IdGenerator, Value, VectorStore,
};
