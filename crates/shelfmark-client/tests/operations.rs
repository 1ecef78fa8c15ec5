//! Single-call operations, topic search and auth validation.

mod common;

use common::{MockTransport, client, doc, ok, page, query_param, status};
use serde_json::json;
use shelfmark_client::{
    Category, CreateDocumentParams, DocumentTags, Error, Location, MessageKind, Method,
    UpdateDocumentParams,
};
use tokio_test::assert_ok;

#[tokio::test]
async fn test_create_document_posts_fields() {
    let transport = MockTransport::scripted(vec![
        status(201, &json!({"id": "new1", "url": "https://read.test/read/new1"}).to_string()),
    ]);
    let client = client(transport);
    let params = CreateDocumentParams {
        title: Some("Saved".into()),
        location: Some(Location::Later),
        tags: vec!["inbox".into()],
        ..CreateDocumentParams::new("https://blog.test/post")
    };

    let response = client.create_document(&params).await.unwrap();

    assert_eq!(response.data.id, "new1");
    let sent = &client.executor().transport().requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "https://api.test/v3/save/");
    assert_eq!(
        sent.body,
        Some(json!({
            "url": "https://blog.test/post",
            "title": "Saved",
            "location": "later",
            "tags": ["inbox"]
        }))
    );
}

#[tokio::test]
async fn test_create_document_requires_url() {
    let client = client(MockTransport::scripted(vec![]));
    let result = client.create_document(&CreateDocumentParams::new(" ")).await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(client.executor().transport().request_count(), 0);
}

#[tokio::test]
async fn test_update_document_patches() {
    let transport = MockTransport::scripted(vec![ok(json!({
        "id": "abc",
        "url": "https://read.test/read/abc",
        "title": "Renamed",
        "category": "pdf"
    }))]);
    let client = client(transport);
    let params = UpdateDocumentParams {
        title: Some("Renamed".into()),
        ..UpdateDocumentParams::default()
    };

    let response = client.update_document("abc", &params).await.unwrap();

    assert_eq!(response.data.title.as_deref(), Some("Renamed"));
    assert_eq!(response.data.category, Some(Category::Pdf));
    let sent = &client.executor().transport().requests()[0];
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.url, "https://api.test/v3/update/abc/");
    assert_eq!(sent.body, Some(json!({"title": "Renamed"})));
}

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let client = client(MockTransport::scripted(vec![]));
    let result = client
        .update_document("abc", &UpdateDocumentParams::default())
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[tokio::test]
async fn test_delete_document_propagates_api_error() {
    let transport = MockTransport::scripted(vec![status(204, ""), status(404, "missing")]);
    let client = client(transport);

    assert_ok!(client.delete_document("one").await);
    let err = client.delete_document("two").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let sent = client.executor().transport().requests();
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[1].url, "https://api.test/v3/delete/two/");
}

#[tokio::test]
async fn test_validate_auth() {
    let transport = MockTransport::scripted(vec![
        status(204, ""),
        ok(json!({"detail": "Authenticated as reader"})),
        status(401, "{\"detail\":\"Invalid token.\"}"),
    ]);
    let client = client(transport);

    assert_eq!(client.validate_auth().await.unwrap().data, "Token is valid");
    assert_eq!(
        client.validate_auth().await.unwrap().data,
        "Authenticated as reader"
    );
    let err = client.validate_auth().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let urls = client.executor().transport().urls();
    assert!(urls.iter().all(|u| u == "https://auth.test/api/v2/auth/"));
}

#[tokio::test]
async fn test_topic_search_scans_every_page() {
    let transport = MockTransport::routed(|request| {
        let body = match query_param(request, "pageCursor").as_deref() {
            None => {
                let mut rust = doc("r1");
                rust["title"] = json!("Fearless concurrency in Rust");
                let mut other = doc("o1");
                other["title"] = json!("Gardening basics");
                page(3, Some("p2"), vec![rust, other])
            }
            Some("p2") => {
                let mut tagged = doc("t1");
                tagged["title"] = json!("Weekly links");
                tagged["tags"] = json!({"rust": {"name": "Rust", "type": "manual"}});
                tagged["html_content"] = json!("<p>dropped</p>");
                page(3, None, vec![tagged])
            }
            Some(other) => panic!("unknown cursor {other}"),
        };
        Ok(ok(body))
    });
    let client = client(transport);

    let response = client
        .search_documents_by_topic(&["RUST".to_string()])
        .await
        .unwrap();

    let ids: Vec<&str> = response.data.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "t1"]);
    assert!(response.data[1].html_content.is_none());
    assert!(matches!(response.data[1].tags, DocumentTags::Keyed(_)));
    assert_eq!(response.messages.len(), 1);
    assert_eq!(response.messages[0].kind, MessageKind::Info);
    assert!(response.messages[0].content.contains("Matched 2 of 3"));
    assert_eq!(client.executor().transport().request_count(), 2);
}

#[tokio::test]
async fn test_topic_search_requires_terms() {
    let client = client(MockTransport::scripted(vec![]));
    let result = client
        .search_documents_by_topic(&["  ".to_string()])
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}
