use std::{error::Error, time::Duration};

use ragdoc_core::{
    DocumentError, EmbeddingError, FormatterConfigError, RagdocError, StoreError,
};

#[test]
fn document_error_display() {
    assert_eq!(
        format!("{}", DocumentError::EmptyId),
        "id must not be null or empty"
    );
    assert_eq!(
        format!(
            "{}",
            DocumentError::NullMetadataValue {
                key: "page".to_string()
            }
        ),
        "metadata value for key 'page' must not be null"
    );
}

#[test]
fn ragdoc_error_wraps_document_error() {
    let err: RagdocError = DocumentError::EmptyMetadataKey.into();
    assert_eq!(
        format!("{err}"),
        "Document error: metadata key must not be empty"
    );
}

#[test]
fn ragdoc_error_wraps_formatter_config_error() {
    let err: RagdocError = FormatterConfigError::EmptyTemplate {
        field: "text_template",
    }
    .into();
    assert_eq!(
        format!("{err}"),
        "Formatter configuration error: text_template must not be empty"
    );
}

#[test]
fn ragdoc_error_wraps_serde_error() {
    let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err = RagdocError::from(parse_error);
    assert!(format!("{err}").starts_with("Serialization/deserialization error: "));
}

#[test]
fn embedding_error_display_for_rate_limited() {
    let err = EmbeddingError::RateLimited {
        retry_after: Some(Duration::from_secs(2)),
    };
    assert_eq!(
        format!("{err}"),
        "Embedding rate limited (retry_after=2s)"
    );
}

#[test]
fn embedding_error_display_for_timeout() {
    let err = EmbeddingError::Timeout(Duration::from_millis(750));
    assert_eq!(format!("{err}"), "Embedding timeout after 750ms");
}

#[test]
fn embedding_error_display_for_other() {
    let err = EmbeddingError::Other("network".to_string().into());
    assert_eq!(format!("{err}"), "Embedding error: network");
    assert!(err.source().is_some());
}

#[test]
fn store_error_internal_preserves_source() {
    let source = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    let err = StoreError::Internal(Box::new(source));

    assert_eq!(format!("{err}"), "Store error: disk");
    assert!(err.source().is_some());
}

#[test]
fn store_error_missing_embedding_names_document() {
    let err = StoreError::MissingEmbedding {
        id: "doc-9".to_string(),
    };
    assert_eq!(format!("{err}"), "document 'doc-9' is missing embedding");
}
