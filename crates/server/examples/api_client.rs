//! Walks through the simlab HTTP API against a running server.
//!
//! ```text
//! cargo run -p simlab-server &
//! cargo run -p simlab-server --example api_client
//! ```

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Text Similarity:");
    let resp = client
        .post(format!("{SERVER_URL}/api/similarity"))
        .json(&json!({
            "text1": "The cat sat on the mat",
            "text2": "A feline rested on the rug"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("3. Embedding:");
    let resp = client
        .post(format!("{SERVER_URL}/api/embed"))
        .json(&json!({ "text": "hello world" }))
        .send()
        .await?;
    let body: serde_json::Value = resp.json().await?;
    println!(
        "dimensions={} magnitude={}",
        body["dimensions"], body["magnitude"]
    );
    println!();

    println!("4. Rerank:");
    let resp = client
        .post(format!("{SERVER_URL}/api/rerank"))
        .json(&json!({
            "query": "What is machine learning?",
            "documents": [
                { "id": 1, "text": "Machine learning is a subset of artificial intelligence", "source": "wikipedia", "initialScore": 0.7 },
                { "id": 2, "text": "The weather forecast predicts rain tomorrow", "source": "news", "initialScore": 0.65 },
                { "id": 3, "text": "Deep learning uses neural networks", "source": "textbook", "initialScore": 0.6 }
            ],
            "topN": 2
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("5. Invalid topN:");
    let resp = client
        .post(format!("{SERVER_URL}/api/rerank"))
        .json(&json!({ "query": "ai", "documents": [], "topN": -1 }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("6. Recent Requests:");
    let resp = client
        .get(format!("{SERVER_URL}/api/devtools/requests"))
        .send()
        .await?;
    println!("Body: {}", resp.text().await?);

    Ok(())
}
