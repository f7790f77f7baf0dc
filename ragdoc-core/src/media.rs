use serde::{Deserialize, Serialize};

use crate::Metadata;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaData {
    Url(String),
    Bytes(Vec<u8>),
}

/// A piece of non-text content (image, audio, ...) attached to a document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Media {
    pub mime_type: String,
    pub data: MediaData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Media {
    pub fn from_url(mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: MediaData::Url(url.into()),
            id: None,
            name: None,
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: MediaData::Bytes(bytes.into()),
            id: None,
            name: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Anything that carries text, attached media and metadata.
pub trait MediaContent {
    fn content(&self) -> &str;

    fn media(&self) -> &[Media];

    fn metadata(&self) -> &Metadata;
}
