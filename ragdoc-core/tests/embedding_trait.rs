use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ragdoc_core::{
    DefaultContentFormatter, Document, Embedding, EmbeddingError, Metadata, Value,
};

#[derive(Default)]
struct RecordingEmbedding {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Embedding for RecordingEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(vec![text.len() as f32])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimension(&self) -> usize {
        1
    }
}

fn assert_object_safe(_embedding: Arc<dyn Embedding>) {}

#[test]
fn embedding_trait_is_object_safe() {
    let embedding = Arc::new(RecordingEmbedding::default());
    assert_object_safe(embedding);
}

#[tokio::test]
async fn embed_document_uses_embed_mode_text() {
    let formatter = DefaultContentFormatter::builder()
        .excluded_embed_metadata_keys(["internal"])
        .build()
        .unwrap();

    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), Value::from("Guide"));
    metadata.insert("internal".to_string(), Value::from("x"));

    let doc = Document::builder()
        .content("text")
        .metadata(metadata)
        .content_formatter(Arc::new(formatter))
        .build()
        .unwrap();

    let embedding = RecordingEmbedding::default();
    let vector = embedding.embed_document(&doc).await.unwrap();

    let seen = embedding.seen.lock().unwrap().clone();
    assert_eq!(seen, vec!["title: Guide\n\ntext".to_string()]);
    assert_eq!(vector, vec![seen[0].len() as f32]);
}
