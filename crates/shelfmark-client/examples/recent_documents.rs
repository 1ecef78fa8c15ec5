//! Example: list recently saved documents with full content
//!
//! This example demonstrates how to:
//! 1. Load the client configuration from the environment
//! 2. Validate the access token
//! 3. List documents saved in the last week, with content hydrated
//! 4. Print advisory messages attached to the response
//!
//! ## Prerequisites
//!
//! ```bash
//! export SHELFMARK_TOKEN="your-access-token"
//! ```
//!
//! ## Running
//!
//! ```bash
//! cargo run --example recent_documents -- rust
//! ```

use chrono::{Duration, Utc};
use shelfmark_client::{ListDocumentsParams, ReaderClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfmark_client=debug,shelfmark_text=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ReaderClient::from_env()?;

    let auth = client.validate_auth().await?;
    println!("Auth: {}", auth.data);

    let params = ListDocumentsParams {
        tag: std::env::args().nth(1),
        added_after: Some(Utc::now() - Duration::days(7)),
        with_full_content: true,
        ..ListDocumentsParams::default()
    };
    let response = client.list_documents(&params).await?;

    println!("{} documents", response.data.count);
    for doc in &response.data.results {
        let preview: String = doc
            .content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(120)
            .collect();
        println!(
            "- [{}] {}\n  {}",
            doc.id,
            doc.title.as_deref().unwrap_or("(untitled)"),
            preview.replace('\n', " ")
        );
    }

    for message in &response.messages {
        println!("{:?}: {}", message.kind, message.content);
    }

    Ok(())
}
