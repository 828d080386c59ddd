use std::error::Error;

use simlab::{compare_texts, rerank_documents, CandidateDocument, SimlabConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimlabConfig::from_file(path)?,
        None => SimlabConfig::default(),
    };

    let result = compare_texts("The cat sat on the mat", "A feline rested on the rug");
    println!(
        "similarity {:.2} over {} dimensions: {}",
        result.similarity, result.dimensions, result.interpretation
    );

    let documents = vec![
        CandidateDocument::new(1, "Machine learning is a subset of artificial intelligence", "wikipedia", 0.7),
        CandidateDocument::new(2, "Deep learning uses neural networks with many layers", "textbook", 0.6),
        CandidateDocument::new(3, "The weather forecast predicts rain tomorrow", "news", 0.65),
        CandidateDocument::new(4, "The stock market closed higher today", "finance", 0.5),
    ];

    let reranker = config.reranker()?;
    let top_n = config.rerank.default_top_n as i64;
    let ranked = rerank_documents(
        reranker.as_ref(),
        "What is machine learning?",
        &documents,
        top_n,
    )
    .await?;

    println!(
        "top {} of {} via {} (simulated: {})",
        ranked.len(),
        documents.len(),
        reranker.name(),
        reranker.is_simulated()
    );
    for doc in &ranked {
        println!(
            "  #{} {:.3} [{}] {}",
            doc.document.id, doc.rerank_score, doc.document.source, doc.document.text
        );
    }

    Ok(())
}
