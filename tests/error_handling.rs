use simlab::{
    compare_embeddings, cosine, embed, rerank_documents, similarity, CandidateDocument,
    ConfigLoadError, Embedding, EmbeddingError, HeuristicReranker, NoJitter, PipelineError,
    RerankConfig, RerankError, SimlabConfig,
};

#[test]
fn similarity_rejects_wrong_dimensions() {
    let good = embed("hello");
    let short = vec![0.0; 64];

    assert!(matches!(
        similarity(good.as_slice(), &short),
        Err(EmbeddingError::InvalidInput(_))
    ));
    assert!(matches!(
        similarity(&short, good.as_slice()),
        Err(EmbeddingError::InvalidInput(_))
    ));
    assert!(cosine(&[], &[]).is_err());
}

#[test]
fn embedding_from_values_validates_length() {
    assert!(Embedding::from_values(vec![0.0; 128]).is_ok());
    let err = Embedding::from_values(vec![1.0; 3]).unwrap_err();
    assert!(err.to_string().contains("128"));
}

#[test]
fn embedding_deserialization_validates_length() {
    let result: Result<Embedding, _> = serde_json::from_str("[0.5, 0.5]");
    assert!(result.is_err());
}

#[test]
fn pipeline_wraps_embedding_errors() {
    let err = compare_embeddings(&[1.0], &[1.0]).unwrap_err();
    assert!(matches!(err, PipelineError::Embedding(_)));
    assert!(err.is_invalid_input());
}

#[test]
fn reranker_rejects_non_finite_scores() {
    let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), NoJitter);
    let docs = vec![CandidateDocument::new(1, "text", "src", f64::NAN)];
    assert!(matches!(
        reranker.rerank("query", &docs, 1),
        Err(RerankError::InvalidInput(_))
    ));
}

#[test]
fn reranker_rejects_too_many_documents() {
    let config = RerankConfig {
        max_documents: 2,
        ..RerankConfig::deterministic()
    };
    let reranker = HeuristicReranker::new(config).unwrap();
    let docs: Vec<_> = (0..3)
        .map(|i| CandidateDocument::new(i, "doc", "src", 0.1))
        .collect();
    assert!(matches!(
        reranker.rerank("query", &docs, 3),
        Err(RerankError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn negative_top_n_is_invalid_input() {
    let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), NoJitter);
    let docs = vec![CandidateDocument::new(1, "text", "src", 0.5)];
    let err = rerank_documents(&reranker, "query", &docs, -3)
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("topN"));
}

#[test]
fn invalid_yaml_config_is_rejected() {
    let err = SimlabConfig::from_yaml_str("version: \"1.0\"\nrerank:\n  max_documents: 0\n")
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Validation(_)));
}
