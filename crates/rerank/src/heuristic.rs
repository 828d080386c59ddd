use async_trait::async_trait;

use crate::keywords::extract_keywords_with;
use crate::{
    CandidateDocument, JitterSource, NoJitter, RankedDocument, RerankConfig, RerankError,
    RerankProvider, UniformJitter, STOP_WORDS,
};

const KEYWORD_BONUS: f64 = 0.1;
const TOPIC_BOOST: f64 = 0.2;
const OFF_TOPIC_PENALTY: f64 = 0.3;

const ML_QUERY_MARKERS: &[&str] = &["machine learning", "ai"];
const ML_DOC_MARKERS: &[&str] = &["machine learning", "artificial intelligence", "deep learning"];
const OFF_TOPIC_DOC_MARKERS: &[&str] = &["weather", "stock market"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Offline stand-in for a hosted reranking model.
///
/// Score = prior + 0.1 per query keyword found in the document, +0.2 when an
/// ML/AI query meets an ML document, -0.3 when it meets weather or stock
/// market content, plus jitter, clamped to [0, 1]. Marker checks are plain
/// substring tests on lower-cased text, so a query containing "said" counts
/// as an "ai" query.
pub struct HeuristicReranker {
    config: RerankConfig,
    stop_words: Vec<String>,
    jitter: Box<dyn JitterSource>,
}

impl std::fmt::Debug for HeuristicReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicReranker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HeuristicReranker {
    fn default() -> Self {
        Self::with_jitter(
            RerankConfig::default(),
            UniformJitter::new(RerankConfig::default_jitter_amplitude()),
        )
    }
}

impl HeuristicReranker {
    /// Builds a reranker whose jitter follows `config`.
    pub fn new(config: RerankConfig) -> Result<Self, RerankError> {
        config.validate()?;
        let jitter: Box<dyn JitterSource> = match (config.jitter_amplitude, config.jitter_seed) {
            (amplitude, _) if amplitude == 0.0 => Box::new(NoJitter),
            (amplitude, Some(seed)) => Box::new(UniformJitter::seeded(amplitude, seed)),
            (amplitude, None) => Box::new(UniformJitter::new(amplitude)),
        };
        Ok(Self::from_parts(config, jitter))
    }

    /// Builds a reranker with an explicit jitter source; the config's jitter
    /// fields are ignored.
    pub fn with_jitter<J: JitterSource + 'static>(config: RerankConfig, jitter: J) -> Self {
        Self::from_parts(config, Box::new(jitter))
    }

    fn from_parts(config: RerankConfig, jitter: Box<dyn JitterSource>) -> Self {
        let stop_words = config
            .stop_words
            .clone()
            .unwrap_or_else(|| STOP_WORDS.iter().map(|w| (*w).to_owned()).collect());
        Self {
            config,
            stop_words,
            jitter,
        }
    }

    pub fn config(&self) -> &RerankConfig {
        &self.config
    }

    /// Reranks `documents` for `query` and keeps the best `top_n`.
    ///
    /// Output is sorted by descending `rerank_score`; equal scores keep their
    /// input order. Length is `min(top_n, documents.len())`.
    pub fn rerank(
        &self,
        query: &str,
        documents: &[CandidateDocument],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, RerankError> {
        self.check_documents(documents)?;

        let query_lower = query.to_lowercase();
        let keywords = extract_keywords_with(&query_lower, &self.stop_words);
        let ml_query = contains_any(&query_lower, ML_QUERY_MARKERS);

        let mut ranked: Vec<RankedDocument> = documents
            .iter()
            .map(|doc| {
                let base = relevance(&keywords, ml_query, doc);
                RankedDocument {
                    document: doc.clone(),
                    rerank_score: (base + self.jitter.sample()).clamp(0.0, 1.0),
                }
            })
            .collect();

        // `sort_by` is stable, which gives the tie-break.
        ranked.sort_by(|a, b| b.rerank_score.total_cmp(&a.rerank_score));
        ranked.truncate(top_n);

        tracing::debug!(
            keywords = keywords.len(),
            ml_query,
            candidates = documents.len(),
            returned = ranked.len(),
            "heuristic rerank complete"
        );
        Ok(ranked)
    }

    fn check_documents(&self, documents: &[CandidateDocument]) -> Result<(), RerankError> {
        if documents.len() > self.config.max_documents {
            return Err(RerankError::InvalidInput(format!(
                "too many documents: {} (max {})",
                documents.len(),
                self.config.max_documents
            )));
        }
        if let Some(doc) = documents.iter().find(|d| !d.initial_score.is_finite()) {
            return Err(RerankError::InvalidInput(format!(
                "document {} has a non-finite initialScore",
                doc.id
            )));
        }
        Ok(())
    }
}

/// Pre-jitter, pre-clamp score.
fn relevance(keywords: &[String], ml_query: bool, doc: &CandidateDocument) -> f64 {
    let text = doc.text.to_lowercase();
    let mut score = doc.initial_score;

    score += keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count() as f64
        * KEYWORD_BONUS;

    if ml_query && contains_any(&text, ML_DOC_MARKERS) {
        score += TOPIC_BOOST;
    }
    if ml_query && contains_any(&text, OFF_TOPIC_DOC_MARKERS) {
        score -= OFF_TOPIC_PENALTY;
    }
    score
}

#[async_trait]
impl RerankProvider for HeuristicReranker {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn is_simulated(&self) -> bool {
        true
    }

    async fn rerank(
        &self,
        query: &str,
        documents: &[CandidateDocument],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, RerankError> {
        HeuristicReranker::rerank(self, query, documents, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact() -> HeuristicReranker {
        HeuristicReranker::with_jitter(RerankConfig::deterministic(), NoJitter)
    }

    fn doc(id: i64, text: &str, initial: f64) -> CandidateDocument {
        CandidateDocument::new(id, text, "test", initial)
    }

    struct Constant(f64);

    impl JitterSource for Constant {
        fn sample(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn keyword_hits_add_point_one_each() {
        let ranked = exact()
            .rerank("rust borrow checker", &[doc(1, "The Rust borrow checker", 0.2)], 1)
            .unwrap();
        assert!((ranked[0].rerank_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn keyword_match_is_substring() {
        // "learn" is found inside "learning"
        let ranked = exact().rerank("learn", &[doc(1, "learning rust", 0.0)], 1).unwrap();
        assert!((ranked[0].rerank_score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn ml_boost_applies() {
        let ranked = exact()
            .rerank("machine learning", &[doc(1, "Intro to deep learning", 0.3)], 1)
            .unwrap();
        // "learning" keyword (+0.1) and topic boost (+0.2)
        assert!((ranked[0].rerank_score - 0.6).abs() < 1e-12);
        assert!(ranked[0].rerank_score > 0.3);
    }

    #[test]
    fn off_topic_penalty_applies() {
        let ranked = exact()
            .rerank(
                "What is machine learning and AI?",
                &[doc(1, "Weekly weather forecast for Oslo", 0.7)],
                1,
            )
            .unwrap();
        assert!((ranked[0].rerank_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn boost_and_penalty_can_both_fire() {
        let ranked = exact()
            .rerank("ai", &[doc(1, "artificial intelligence predicts the stock market", 0.5)], 1)
            .unwrap();
        // +0.2 -0.3, "ai" is too short to be a keyword
        assert!((ranked[0].rerank_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn non_ml_query_skips_topic_rules() {
        let ranked = exact()
            .rerank("sunny beaches", &[doc(1, "weather report", 0.5)], 1)
            .unwrap();
        assert!((ranked[0].rerank_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scores_clamp_to_unit_interval() {
        let docs = [
            doc(1, "machine learning machine learning", 0.95),
            doc(2, "stock market crash", 0.1),
        ];
        let ranked = exact().rerank("machine learning", &docs, 2).unwrap();
        assert_eq!(ranked[0].rerank_score, 1.0);
        assert_eq!(ranked[1].rerank_score, 0.0);
    }

    #[test]
    fn sorted_descending_and_truncated() {
        let docs = [
            doc(1, "nothing relevant", 0.1),
            doc(2, "rust rust", 0.9),
            doc(3, "something else", 0.5),
            doc(4, "also unrelated", 0.3),
        ];
        let ranked = exact().rerank("rust", &docs, 2).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|r| r.document.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn ties_keep_input_order() {
        let docs = [doc(10, "a", 0.5), doc(11, "b", 0.5), doc(12, "c", 0.5)];
        let ranked = exact().rerank("zzz", &docs, 3).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|r| r.document.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn top_n_larger_than_input() {
        let ranked = exact().rerank("q", &[doc(1, "x", 0.1)], 10).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn top_n_zero_returns_empty() {
        assert!(exact().rerank("q", &[doc(1, "x", 0.1)], 0).unwrap().is_empty());
    }

    #[test]
    fn empty_documents() {
        assert!(exact().rerank("anything", &[], 3).unwrap().is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let docs = vec![doc(1, "Machine Learning", 0.4)];
        let before = docs.clone();
        let ranked = exact().rerank("machine learning", &docs, 1).unwrap();
        assert_eq!(docs, before);
        assert_eq!(ranked[0].document, before[0]);
    }

    #[test]
    fn jitter_is_added_before_clamp() {
        let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), Constant(0.05));
        let ranked = reranker.rerank("q", &[doc(1, "x", 0.5)], 1).unwrap();
        assert!((ranked[0].rerank_score - 0.55).abs() < 1e-12);

        let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), Constant(-0.05));
        let ranked = reranker.rerank("q", &[doc(1, "x", 0.0)], 1).unwrap();
        assert_eq!(ranked[0].rerank_score, 0.0);
    }

    #[test]
    fn default_jitter_stays_within_band() {
        let reranker = HeuristicReranker::new(RerankConfig::default()).unwrap();
        for _ in 0..200 {
            let ranked = reranker.rerank("q", &[doc(1, "x", 0.5)], 1).unwrap();
            assert!((ranked[0].rerank_score - 0.5).abs() <= 0.05 + 1e-12);
        }
    }

    #[test]
    fn seeded_rerankers_agree() {
        let cfg = RerankConfig {
            jitter_seed: Some(1234),
            ..Default::default()
        };
        let docs = [doc(1, "a", 0.5), doc(2, "b", 0.5), doc(3, "c", 0.5)];
        let a = HeuristicReranker::new(cfg.clone()).unwrap().rerank("q", &docs, 3).unwrap();
        let b = HeuristicReranker::new(cfg).unwrap().rerank("q", &docs, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_too_many_documents() {
        let cfg = RerankConfig {
            max_documents: 1,
            ..RerankConfig::deterministic()
        };
        let reranker = HeuristicReranker::new(cfg).unwrap();
        let err = reranker
            .rerank("q", &[doc(1, "a", 0.1), doc(2, "b", 0.1)], 1)
            .unwrap_err();
        assert!(matches!(err, RerankError::InvalidInput(_)));
    }

    #[test]
    fn rejects_non_finite_scores() {
        let err = exact().rerank("q", &[doc(1, "a", f64::NAN)], 1).unwrap_err();
        assert!(matches!(err, RerankError::InvalidInput(_)));
    }

    #[test]
    fn custom_stop_words_change_keywords() {
        let cfg = RerankConfig {
            stop_words: Some(vec!["rust".into()]),
            ..RerankConfig::deterministic()
        };
        let reranker = HeuristicReranker::new(cfg).unwrap();
        let ranked = reranker.rerank("rust", &[doc(1, "rust", 0.0)], 1).unwrap();
        assert_eq!(ranked[0].rerank_score, 0.0);
    }

    #[tokio::test]
    async fn provider_impl_is_simulated() {
        let reranker = exact();
        let provider: &dyn RerankProvider = &reranker;
        assert!(provider.is_simulated());
        assert_eq!(provider.name(), "heuristic");
        let ranked = provider.rerank("rust", &[doc(1, "rust", 0.0)], 1).await.unwrap();
        assert_eq!(ranked.len(), 1);
    }
}
