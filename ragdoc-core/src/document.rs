use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::canonical_metadata;
use crate::{
    ContentFormatter, DefaultContentFormatter, DocumentError, IdGenerator, Media, MediaContent,
    Metadata, MetadataMode, RandomIdGenerator, Value,
};

pub const EMPTY_TEXT: &str = "";

/// Formatter shared by every document that has not been given its own.
pub fn default_content_formatter() -> Arc<dyn ContentFormatter> {
    static DEFAULT: OnceLock<Arc<dyn ContentFormatter>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| Arc::new(DefaultContentFormatter::default()))
        .clone()
}

/// A unit of text travelling through a retrieval pipeline.
///
/// Identity is `(id, content, metadata)`. The embedding and the content formatter are
/// ephemeral: they are ignored by `==` and `Hash`, and the formatter is never serialized.
#[derive(Clone)]
pub struct Document {
    id: String,
    content: String,
    media: Vec<Media>,
    metadata: Metadata,
    embedding: Vec<f32>,
    content_formatter: Arc<dyn ContentFormatter>,
}

impl Document {
    /// Document with no metadata and a random id.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_metadata(content, Metadata::new())
    }

    pub fn with_metadata(content: impl Into<String>, metadata: Metadata) -> Self {
        let content = content.into();
        let id = RandomIdGenerator.generate_id(&content, &metadata);
        tracing::debug!(document_id = %id, "generated document id");
        Self::assemble(id, content, Vec::new(), metadata)
    }

    pub fn with_id_generator(
        content: impl Into<String>,
        metadata: Metadata,
        id_generator: &dyn IdGenerator,
    ) -> Result<Self, DocumentError> {
        let content = content.into();
        let id = id_generator.generate_id(&content, &metadata);
        tracing::debug!(document_id = %id, "generated document id");
        Self::from_parts(id, content, Vec::new(), metadata)
    }

    pub fn with_id(
        id: impl Into<String>,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> Result<Self, DocumentError> {
        Self::from_parts(id, content, Vec::new(), metadata)
    }

    pub fn from_parts(
        id: impl Into<String>,
        content: impl Into<String>,
        media: Vec<Media>,
        metadata: Metadata,
    ) -> Result<Self, DocumentError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DocumentError::EmptyId);
        }
        Ok(Self::assemble(id, content.into(), media, metadata))
    }

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    fn assemble(id: String, content: String, media: Vec<Media>, metadata: Metadata) -> Self {
        Self {
            id,
            content,
            media,
            metadata,
            embedding: Vec::new(),
            content_formatter: default_content_formatter(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Embedding computed by an external model; empty until one is attached.
    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    pub fn set_embedding(&mut self, embedding: Vec<f32>) {
        self.embedding = embedding;
    }

    pub fn content_formatter(&self) -> &Arc<dyn ContentFormatter> {
        &self.content_formatter
    }

    pub fn set_content_formatter(&mut self, content_formatter: Arc<dyn ContentFormatter>) {
        self.content_formatter = content_formatter;
    }

    /// Content plus all metadata, rendered by the attached formatter.
    pub fn formatted_content(&self) -> String {
        self.formatted_content_with(MetadataMode::All)
    }

    pub fn formatted_content_with(&self, mode: MetadataMode) -> String {
        self.content_formatter.format(self, mode)
    }

    /// Renders with an external formatter, leaving the attached one untouched.
    pub fn format_with(&self, formatter: &dyn ContentFormatter, mode: MetadataMode) -> String {
        formatter.format(self, mode)
    }
}

impl MediaContent for Document {
    fn content(&self) -> &str {
        &self.content
    }

    fn media(&self) -> &[Media] {
        &self.media
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.content == other.content && self.metadata == other.metadata
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.content.hash(state);
        canonical_metadata(&self.metadata).hash(state);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("media", &self.media)
            .field("metadata", &self.metadata)
            .field("embedding_dimension", &self.embedding.len())
            .field("content_formatter", &self.content_formatter)
            .finish()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document{{id='{}', metadata={}, content='{}', media={:?}}}",
            self.id,
            canonical_metadata(&self.metadata),
            self.content,
            self.media
        )
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    id: &'a str,
    content: &'a str,
    media: &'a [Media],
    metadata: &'a Metadata,
    #[serde(skip_serializing_if = "is_empty_embedding")]
    embedding: &'a [f32],
}

fn is_empty_embedding(embedding: &&[f32]) -> bool {
    embedding.is_empty()
}

#[derive(Deserialize)]
struct DocumentWire {
    #[serde(default)]
    id: Option<String>,
    content: String,
    #[serde(default)]
    media: Vec<Media>,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    embedding: Vec<f32>,
}

impl DocumentWire {
    fn into_document(self) -> Result<Document, DocumentError> {
        let mut builder = Document::builder()
            .content(self.content)
            .media(self.media)
            .metadata(self.metadata);
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        let mut document = builder.build()?;
        document.set_embedding(self.embedding);
        Ok(document)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DocumentRef {
            id: &self.id,
            content: &self.content,
            media: &self.media,
            metadata: &self.metadata,
            embedding: &self.embedding,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = DocumentWire::deserialize(deserializer)?;
        wire.into_document().map_err(serde::de::Error::custom)
    }
}

/// Step-by-step construction of a [`Document`].
///
/// Setter misuse is remembered and reported by [`DocumentBuilder::build`]; the first
/// error wins. Without an explicit id, one is derived from the content and metadata by
/// the configured [`IdGenerator`] (random UUIDs by default).
pub struct DocumentBuilder {
    id: Option<String>,
    content: String,
    media: Vec<Media>,
    metadata: Metadata,
    id_generator: Arc<dyn IdGenerator>,
    content_formatter: Option<Arc<dyn ContentFormatter>>,
    error: Option<DocumentError>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            id: None,
            content: EMPTY_TEXT.to_string(),
            media: Vec::new(),
            metadata: Metadata::new(),
            id_generator: Arc::new(RandomIdGenerator),
            content_formatter: None,
            error: None,
        }
    }
}

impl fmt::Debug for DocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentBuilder")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("media", &self.media)
            .field("metadata", &self.metadata)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            self.fail(DocumentError::EmptyId);
        } else {
            self.id = Some(id);
        }
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Replaces the media list.
    pub fn media(mut self, media: Vec<Media>) -> Self {
        self.media = media;
        self
    }

    pub fn add_media(mut self, media: Media) -> Self {
        self.media.push(media);
        self
    }

    /// Replaces the metadata map.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            self.fail(DocumentError::EmptyMetadataKey);
        } else if value.is_null() {
            self.fail(DocumentError::NullMetadataValue { key });
        } else {
            self.metadata.insert(key, value);
        }
        self
    }

    pub fn content_formatter(mut self, content_formatter: Arc<dyn ContentFormatter>) -> Self {
        self.content_formatter = Some(content_formatter);
        self
    }

    pub fn build(self) -> Result<Document, DocumentError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let id = match self.id {
            Some(id) => id,
            None => {
                let id = self.id_generator.generate_id(&self.content, &self.metadata);
                tracing::debug!(document_id = %id, "generated document id");
                id
            }
        };

        let mut document = Document::from_parts(id, self.content, self.media, self.metadata)?;
        if let Some(content_formatter) = self.content_formatter {
            document.content_formatter = content_formatter;
        }
        Ok(document)
    }

    fn fail(&mut self, error: DocumentError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
