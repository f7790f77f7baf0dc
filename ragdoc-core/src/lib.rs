mod document;
mod embedding;
mod error;
mod formatter;
mod id;
mod media;
mod metadata_filter;
mod value;
mod vector_store;

pub use document::{default_content_formatter, Document, DocumentBuilder, EMPTY_TEXT};
pub use embedding::Embedding;
pub use error::{DocumentError, EmbeddingError, FormatterConfigError, RagdocError, StoreError};
pub use formatter::{
    ContentFormatter, DefaultContentFormatter, DefaultContentFormatterBuilder, FormatterConfig,
    MetadataMode, CONTENT_PLACEHOLDER, DEFAULT_METADATA_SEPARATOR, DEFAULT_METADATA_TEMPLATE,
    DEFAULT_TEXT_TEMPLATE, KEY_PLACEHOLDER, METADATA_STRING_PLACEHOLDER, VALUE_PLACEHOLDER,
};
pub use id::{IdGenerator, RandomIdGenerator, Sha256IdGenerator};
pub use media::{Media, MediaContent, MediaData};
pub use metadata_filter::MetadataFilter;
pub use value::{render_value, Metadata, Value};
pub use vector_store::{SearchResult, VectorStore};

pub mod prelude;
