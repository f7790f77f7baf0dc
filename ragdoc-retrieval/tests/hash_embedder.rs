use ragdoc_core::Embedding;
use ragdoc_retrieval::HashEmbedder;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[tokio::test]
async fn hash_embedder_is_deterministic() {
    let embedder = HashEmbedder::new(16);
    let first = embedder.embed("hello world").await.unwrap();
    let second = embedder.embed("hello world").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 16);
}

#[tokio::test]
async fn hash_embedder_batch_matches_single() {
    let embedder = HashEmbedder::new(16);
    let batch = embedder
        .embed_batch(&["hello".to_string()])
        .await
        .unwrap();
    let single = embedder.embed("hello").await.unwrap();
    assert_eq!(batch[0], single);
}

#[tokio::test]
async fn hash_embedder_output_is_unit_length() {
    let embedder = HashEmbedder::new(32);
    let vector = embedder.embed("the quick brown fox").await.unwrap();
    let norm: f32 = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn hash_embedder_ignores_case_and_punctuation() {
    let embedder = HashEmbedder::new(32);
    let lower = embedder.embed("rust borrow checker").await.unwrap();
    let noisy = embedder.embed("Rust, BORROW checker!").await.unwrap();
    assert_eq!(lower, noisy);
    assert!((cosine(&lower, &noisy) - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn hash_embedder_empty_text_is_zero_vector() {
    let embedder = HashEmbedder::new(8);
    let vector = embedder.embed("").await.unwrap();
    assert!(vector.iter().all(|value| *value == 0.0));
}
