use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::value::canonical_metadata;
use crate::Metadata;

/// Derives a document id from its content and metadata.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self, content: &str, metadata: &Metadata) -> String;
}

impl<G> IdGenerator for &G
where
    G: IdGenerator + ?Sized,
{
    fn generate_id(&self, content: &str, metadata: &Metadata) -> String {
        (**self).generate_id(content, metadata)
    }
}

impl<G> IdGenerator for Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn generate_id(&self, content: &str, metadata: &Metadata) -> String {
        (**self).generate_id(content, metadata)
    }
}

/// Random UUID v4 ids. Inputs are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self, _content: &str, _metadata: &Metadata) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Content-addressed ids: the same content and metadata always produce the same id.
///
/// The SHA-256 digest of the content followed by the key-sorted JSON metadata is used
/// as the name of a v5 UUID, so ids stay in the familiar UUID shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256IdGenerator;

impl Sha256IdGenerator {
    fn digest(content: &str, metadata: &Metadata) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hasher.update(canonical_metadata(metadata).as_bytes());
        hasher.finalize().to_vec()
    }
}

impl IdGenerator for Sha256IdGenerator {
    fn generate_id(&self, content: &str, metadata: &Metadata) -> String {
        let digest = Self::digest(content, metadata);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &digest).to_string()
    }
}
