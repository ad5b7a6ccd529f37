use serde_json::{Map, Value};
use tonic::{Request, Response, Status};

use quillpress_core::{Collection, Document, DocumentStore, StoreError};
use quillpress_protocol::pb::annotation::v1 as pb;

use pb::annotation_service_server::AnnotationService;

#[derive(Debug, Clone)]
pub struct AnnotationHandler {
    annotations: Collection,
}

impl AnnotationHandler {
    pub fn build(data_dir: &str) -> Result<Self, StoreError> {
        let store = DocumentStore::open(data_dir)?;
        Ok(Self {
            annotations: store.collection("annotations"),
        })
    }
}

fn storage_failure(err: StoreError) -> Status {
    tracing::error!(error = %err, "document store failure");
    Status::internal(err.to_string())
}

fn annotation(doc: &Document) -> pb::Annotation {
    pb::Annotation {
        id: doc.id.clone(),
        body: doc.str_field("body"),
        owner_id: doc.str_field("owner_id"),
        content_id: doc.str_field("content_id"),
    }
}

#[tonic::async_trait]
impl AnnotationService for AnnotationHandler {
    async fn get_annotation(
        &self,
        request: Request<pb::GetAnnotationRequest>,
    ) -> Result<Response<pb::Annotation>, Status> {
        let req = request.into_inner();
        match self.annotations.get(&req.id).map_err(storage_failure)? {
            Some(doc) => Ok(Response::new(annotation(&doc))),
            None => Err(Status::not_found(format!(
                "no annotation with id {}",
                req.id
            ))),
        }
    }

    async fn create_annotation(
        &self,
        request: Request<pb::CreateAnnotationRequest>,
    ) -> Result<Response<pb::Annotation>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        fields.insert("body".to_string(), Value::String(req.body.clone()));
        fields.insert("owner_id".to_string(), Value::String(req.owner_id.clone()));
        fields.insert(
            "content_id".to_string(),
            Value::String(req.content_id.clone()),
        );
        let id = self.annotations.insert(fields).map_err(storage_failure)?;
        tracing::info!(%id, content_id = %req.content_id, "created annotation");

        // At-creation snapshot: assigned id plus the request fields, never a
        // re-read from storage.
        Ok(Response::new(pb::Annotation {
            id,
            body: req.body,
            owner_id: req.owner_id,
            content_id: req.content_id,
        }))
    }

    async fn update_annotation(
        &self,
        request: Request<pb::UpdateAnnotationRequest>,
    ) -> Result<Response<pb::Annotation>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        if let Some(body) = req.body {
            fields.insert("body".to_string(), Value::String(body));
        }
        match self
            .annotations
            .update(&req.id, fields)
            .map_err(storage_failure)?
        {
            Some(doc) => Ok(Response::new(annotation(&doc))),
            None => Err(Status::not_found(format!(
                "no annotation with id {}",
                req.id
            ))),
        }
    }

    async fn delete_annotation(
        &self,
        request: Request<pb::DeleteAnnotationRequest>,
    ) -> Result<Response<pb::Annotation>, Status> {
        let req = request.into_inner();
        match self.annotations.delete(&req.id).map_err(storage_failure)? {
            Some(doc) => {
                tracing::info!(id = %req.id, "deleted annotation");
                Ok(Response::new(annotation(&doc)))
            }
            None => Err(Status::not_found(format!(
                "no annotation with id {}",
                req.id
            ))),
        }
    }
}
