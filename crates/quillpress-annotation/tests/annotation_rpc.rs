use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};
use tonic::Code;

use quillpress_annotation::handler::AnnotationHandler;
use quillpress_protocol::pb::annotation::v1 as pb;
use pb::annotation_service_client::AnnotationServiceClient;
use pb::annotation_service_server::AnnotationServiceServer;

async fn start_server(data_dir: &Path) -> SocketAddr {
    let svc = AnnotationHandler::build(&data_dir.to_string_lossy()).expect("handler");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        Server::builder()
            .add_service(AnnotationServiceServer::new(svc))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("annotation server");
    });
    addr
}

async fn client(addr: SocketAddr) -> AnnotationServiceClient<Channel> {
    AnnotationServiceClient::connect(format!("http://{addr}"))
        .await
        .expect("connect")
}

#[tokio::test]
async fn create_get_update_delete_roundtrip() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let created = c
        .create_annotation(pb::CreateAnnotationRequest {
            body: "nice".to_string(),
            owner_id: "u1".to_string(),
            content_id: "b1".to_string(),
        })
        .await
        .expect("create")
        .into_inner();
    assert!(!created.id.is_empty());
    assert_eq!(created.content_id, "b1");

    let fetched = c
        .get_annotation(pb::GetAnnotationRequest {
            id: created.id.clone(),
        })
        .await
        .expect("get")
        .into_inner();
    assert_eq!(fetched, created);

    let updated = c
        .update_annotation(pb::UpdateAnnotationRequest {
            id: created.id.clone(),
            body: Some("edited".to_string()),
        })
        .await
        .expect("update")
        .into_inner();
    assert_eq!(updated.body, "edited");
    assert_eq!(updated.owner_id, "u1");
    assert_eq!(updated.content_id, "b1");

    let deleted = c
        .delete_annotation(pb::DeleteAnnotationRequest {
            id: created.id.clone(),
        })
        .await
        .expect("delete")
        .into_inner();
    assert_eq!(deleted, updated);

    let err = c
        .get_annotation(pb::GetAnnotationRequest { id: created.id })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);
}

#[tokio::test]
async fn operations_on_unknown_ids_are_not_found() {
    let dir = TempDir::new().expect("tmp");
    let addr = start_server(dir.path()).await;
    let mut c = client(addr).await;

    let err = c
        .get_annotation(pb::GetAnnotationRequest {
            id: "missing".to_string(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);

    let err = c
        .update_annotation(pb::UpdateAnnotationRequest {
            id: "missing".to_string(),
            body: Some("x".to_string()),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);

    let err = c
        .delete_annotation(pb::DeleteAnnotationRequest {
            id: "missing".to_string(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code(), Code::NotFound);
}
