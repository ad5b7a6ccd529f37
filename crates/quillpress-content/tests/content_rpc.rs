use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};
use tonic::Code;

use quillpress_content::handler::ContentHandler;
use quillpress_core::DocumentStore;
use quillpress_protocol::pb::content::v1 as pb;
use pb::content_service_client::ContentServiceClient;
use pb::content_service_server::ContentServiceServer;

async fn start_server(data_dir: &Path) -> SocketAddr {
    let svc = ContentHandler::build(&data_dir.to_string_lossy()).expect("handler");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        Server::builder()
            .add_service(ContentServiceServer::new(svc))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("content server");
    });
    addr
}

async fn client(addr: SocketAddr) -> ContentServiceClient<Channel> {
    ContentServiceClient::connect(format!("http://{addr}"))
        .await
        .expect("connect")
}

async fn create(
    c: &mut ContentServiceClient<Channel>,
    owner_id: &str,
    title: &str,
    category: &str,
) -> pb::ContentItem {
    c.create_content(pb::CreateContentRequest {
        title: title.to_string(),
        body: format!("body of {title}"),
        owner_id: owner_id.to_string(),
        category: category.to_string(),
    })
    .await
    .expect("create")
    .into_inner()
}

#[tokio::test]
async fn create_assigns_id_stable_across_gets() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let created = create(&mut c, "u1", "T", "tech").await;
    assert!(!created.id.is_empty());
    assert_eq!(created.title, "T");
    assert_eq!(created.owner_id, "u1");

    for _ in 0..2 {
        let fetched = c
            .get_content(pb::GetContentRequest {
                id: created.id.clone(),
            })
            .await
            .expect("get")
            .into_inner();
        assert_eq!(fetched, created);
    }
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let err = c
        .get_content(pb::GetContentRequest {
            id: "missing".to_string(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);
}

#[tokio::test]
async fn update_merges_supplied_fields_only() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let created = create(&mut c, "u1", "T", "tech").await;
    let updated = c
        .update_content(pb::UpdateContentRequest {
            id: created.id.clone(),
            title: Some("T2".to_string()),
            body: None,
            category: None,
        })
        .await
        .expect("update")
        .into_inner();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.body, created.body);
    assert_eq!(updated.category, "tech");
    assert_eq!(updated.owner_id, "u1");
}

#[tokio::test]
async fn update_after_delete_is_not_found() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let created = create(&mut c, "u1", "T", "tech").await;
    let snapshot = c
        .delete_content(pb::DeleteContentRequest {
            id: created.id.clone(),
        })
        .await
        .expect("delete")
        .into_inner();
    assert_eq!(snapshot, created);

    let err = c
        .update_content(pb::UpdateContentRequest {
            id: created.id.clone(),
            title: Some("T2".to_string()),
            body: None,
            category: None,
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);

    let err = c
        .delete_content(pb::DeleteContentRequest { id: created.id })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);
}

#[tokio::test]
async fn list_by_owner_returns_exact_set_and_empty_when_no_match() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let a = create(&mut c, "u1", "one", "tech").await;
    create(&mut c, "u2", "two", "tech").await;
    let b = create(&mut c, "u1", "three", "life").await;

    let listing = c
        .list_content_by_owner(pb::ListContentByOwnerRequest {
            owner_id: "u1".to_string(),
        })
        .await
        .expect("list")
        .into_inner();
    let ids: BTreeSet<String> = listing.items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, BTreeSet::from([a.id, b.id]));

    let empty = c
        .list_content_by_owner(pb::ListContentByOwnerRequest {
            owner_id: "u9".to_string(),
        })
        .await
        .expect("list")
        .into_inner();
    assert!(empty.items.is_empty());
}

#[tokio::test]
async fn list_by_category_filters_on_category() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    create(&mut c, "u1", "one", "tech").await;
    let b = create(&mut c, "u2", "two", "life").await;

    let listing = c
        .list_content_by_category(pb::ListContentByCategoryRequest {
            category: "life".to_string(),
        })
        .await
        .expect("list")
        .into_inner();
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].id, b.id);
}

#[tokio::test]
async fn list_annotations_reads_shared_annotations_collection() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let blog = create(&mut c, "u1", "T", "tech").await;

    // The annotation daemon writes this collection; seed it through a second
    // store handle on the same root, as that process would.
    let store = DocumentStore::open(dir.path()).expect("store");
    let annotations = store.collection("annotations");
    let annotation_id = annotations
        .insert(
            [
                ("body".to_string(), json!("nice post")),
                ("owner_id".to_string(), json!("u2")),
                ("content_id".to_string(), json!(blog.id.clone())),
            ]
            .into_iter()
            .collect(),
        )
        .expect("insert annotation");
    annotations
        .insert(
            [
                ("body".to_string(), json!("other thread")),
                ("owner_id".to_string(), json!("u2")),
                ("content_id".to_string(), json!("some-other-blog")),
            ]
            .into_iter()
            .collect(),
        )
        .expect("insert annotation");

    let listing = c
        .list_annotations_for_content(pb::ListAnnotationsForContentRequest {
            content_id: blog.id.clone(),
        })
        .await
        .expect("list")
        .into_inner();
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].id, annotation_id);
    assert_eq!(listing.items[0].body, "nice post");
    assert_eq!(listing.items[0].content_id, blog.id);
}
