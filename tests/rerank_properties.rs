use simlab::{
    extract_keywords, CandidateDocument, HeuristicReranker, NoJitter, RankedDocument,
    RerankConfig, UniformJitter,
};

fn exact() -> HeuristicReranker {
    HeuristicReranker::with_jitter(RerankConfig::default(), NoJitter)
}

fn score_of(ranked: &[RankedDocument], id: i64) -> f64 {
    ranked
        .iter()
        .find(|r| r.document.id == id)
        .map(|r| r.rerank_score)
        .unwrap()
}

fn corpus() -> Vec<CandidateDocument> {
    vec![
        CandidateDocument::new(1, "Machine learning is a subset of artificial intelligence", "wikipedia", 0.7),
        CandidateDocument::new(2, "Deep learning uses neural networks with many layers", "textbook", 0.6),
        CandidateDocument::new(3, "The weather forecast predicts rain tomorrow", "news", 0.65),
        CandidateDocument::new(4, "The stock market closed higher today", "finance", 0.5),
        CandidateDocument::new(5, "Rust guarantees memory safety without a garbage collector", "blog", 0.55),
    ]
}

#[test]
fn off_topic_documents_are_penalized() {
    let docs = vec![CandidateDocument::new(1, "Sunny weather in the news", "news", 0.5)];
    let ranked = exact().rerank("AI news", &docs, 1).unwrap();
    // "news" is a keyword hit (+0.1), weather is off-topic for an AI query (-0.3).
    assert!((ranked[0].rerank_score - 0.3).abs() < 1e-12);
}

#[test]
fn ml_documents_are_boosted() {
    let docs = vec![CandidateDocument::new(1, "An intro to deep learning", "blog", 0.3)];
    let ranked = exact().rerank("machine learning", &docs, 1).unwrap();
    // "learning" keyword (+0.1) and ML topic boost (+0.2).
    assert!((ranked[0].rerank_score - 0.6).abs() < 1e-12);
}

#[test]
fn non_ml_queries_get_no_topic_adjustment() {
    let docs = vec![CandidateDocument::new(1, "The weather is nice", "news", 0.5)];
    let ranked = exact().rerank("rust borrow checker", &docs, 1).unwrap();
    assert_eq!(ranked[0].rerank_score, 0.5);
}

#[test]
fn result_length_is_bounded() {
    let docs = corpus();
    for top_n in [0, 1, 3, 5, 50] {
        let ranked = exact().rerank("machine learning", &docs, top_n).unwrap();
        assert_eq!(ranked.len(), top_n.min(docs.len()));
    }
    assert!(exact().rerank("anything", &[], 3).unwrap().is_empty());
}

#[test]
fn results_are_sorted_descending_and_clamped() {
    let reranker =
        HeuristicReranker::with_jitter(RerankConfig::default(), UniformJitter::seeded(0.05, 3));
    for query in ["What is machine learning?", "AI", "weather", "rust memory"] {
        let ranked = reranker.rerank(query, &corpus(), 5).unwrap();
        assert!(ranked
            .windows(2)
            .all(|w| w[0].rerank_score >= w[1].rerank_score));
        assert!(ranked
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.rerank_score)));
    }
}

#[test]
fn scores_are_clamped_at_both_ends() {
    let docs = vec![
        CandidateDocument::new(1, "machine learning and deep learning", "a", 0.95),
        CandidateDocument::new(2, "stock market weather", "b", 0.05),
    ];
    let ranked = exact().rerank("machine learning", &docs, 2).unwrap();
    assert_eq!(score_of(&ranked, 1), 1.0);
    assert_eq!(score_of(&ranked, 2), 0.0);
}

#[test]
fn ties_keep_input_order() {
    let docs: Vec<_> = (1..=4)
        .map(|id| CandidateDocument::new(id, "identical text", "same", 0.5))
        .collect();
    let ranked = exact().rerank("unrelated query", &docs, 4).unwrap();
    let ids: Vec<i64> = ranked.iter().map(|r| r.document.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn ranking_for_ml_query() {
    let ranked = exact().rerank("What is machine learning?", &corpus(), 3).unwrap();
    let ids: Vec<i64> = ranked.iter().map(|r| r.document.id).collect();
    assert_eq!(ids, vec![1, 2, 5]);
    // Input documents are untouched.
    assert_eq!(ranked[0].document, corpus()[0]);
}

#[test]
fn jitter_stays_within_amplitude() {
    let docs = vec![CandidateDocument::new(1, "plain", "src", 0.5)];
    let reranker =
        HeuristicReranker::with_jitter(RerankConfig::default(), UniformJitter::seeded(0.05, 99));
    for _ in 0..200 {
        let score = reranker.rerank("other", &docs, 1).unwrap()[0].rerank_score;
        assert!((0.449..=0.551).contains(&score), "score {score} outside jitter band");
    }
}

#[test]
fn keyword_extraction_drops_stop_words_and_short_tokens() {
    assert_eq!(
        extract_keywords("What is the best way to learn AI and ML"),
        vec!["best", "way", "learn"]
    );
}
