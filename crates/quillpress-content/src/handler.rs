use serde_json::{Map, Value};
use tonic::{Request, Response, Status};

use quillpress_core::{Collection, Document, DocumentStore, StoreError};
use quillpress_protocol::pb::annotation::v1 as annotation_pb;
use quillpress_protocol::pb::content::v1 as pb;

use pb::content_service_server::ContentService;

/// Content service handler. Owns the `contents` collection, and reads the
/// `annotations` collection for child listings. The annotation daemon writes
/// that collection, so both deployments point at the same store root.
#[derive(Debug, Clone)]
pub struct ContentHandler {
    contents: Collection,
    annotations: Collection,
}

impl ContentHandler {
    pub fn build(data_dir: &str) -> Result<Self, StoreError> {
        let store = DocumentStore::open(data_dir)?;
        Ok(Self {
            contents: store.collection("contents"),
            annotations: store.collection("annotations"),
        })
    }
}

fn storage_failure(err: StoreError) -> Status {
    tracing::error!(error = %err, "document store failure");
    Status::internal(err.to_string())
}

fn content_item(doc: &Document) -> pb::ContentItem {
    pb::ContentItem {
        id: doc.id.clone(),
        title: doc.str_field("title"),
        body: doc.str_field("body"),
        owner_id: doc.str_field("owner_id"),
        category: doc.str_field("category"),
    }
}

fn annotation(doc: &Document) -> annotation_pb::Annotation {
    annotation_pb::Annotation {
        id: doc.id.clone(),
        body: doc.str_field("body"),
        owner_id: doc.str_field("owner_id"),
        content_id: doc.str_field("content_id"),
    }
}

#[tonic::async_trait]
impl ContentService for ContentHandler {
    async fn get_content(
        &self,
        request: Request<pb::GetContentRequest>,
    ) -> Result<Response<pb::ContentItem>, Status> {
        let req = request.into_inner();
        match self.contents.get(&req.id).map_err(storage_failure)? {
            Some(doc) => Ok(Response::new(content_item(&doc))),
            None => Err(Status::not_found(format!(
                "no content item with id {}",
                req.id
            ))),
        }
    }

    async fn create_content(
        &self,
        request: Request<pb::CreateContentRequest>,
    ) -> Result<Response<pb::ContentItem>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(req.title.clone()));
        fields.insert("body".to_string(), Value::String(req.body.clone()));
        fields.insert("owner_id".to_string(), Value::String(req.owner_id.clone()));
        fields.insert("category".to_string(), Value::String(req.category.clone()));
        let id = self.contents.insert(fields).map_err(storage_failure)?;
        tracing::info!(%id, owner_id = %req.owner_id, "created content item");

        // At-creation snapshot: assigned id plus the request fields, never a
        // re-read from storage.
        Ok(Response::new(pb::ContentItem {
            id,
            title: req.title,
            body: req.body,
            owner_id: req.owner_id,
            category: req.category,
        }))
    }

    async fn update_content(
        &self,
        request: Request<pb::UpdateContentRequest>,
    ) -> Result<Response<pb::ContentItem>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        if let Some(title) = req.title {
            fields.insert("title".to_string(), Value::String(title));
        }
        if let Some(body) = req.body {
            fields.insert("body".to_string(), Value::String(body));
        }
        if let Some(category) = req.category {
            fields.insert("category".to_string(), Value::String(category));
        }
        match self.contents.update(&req.id, fields).map_err(storage_failure)? {
            Some(doc) => Ok(Response::new(content_item(&doc))),
            None => Err(Status::not_found(format!(
                "no content item with id {}",
                req.id
            ))),
        }
    }

    async fn delete_content(
        &self,
        request: Request<pb::DeleteContentRequest>,
    ) -> Result<Response<pb::ContentItem>, Status> {
        let req = request.into_inner();
        match self.contents.delete(&req.id).map_err(storage_failure)? {
            Some(doc) => {
                tracing::info!(id = %req.id, "deleted content item");
                Ok(Response::new(content_item(&doc)))
            }
            None => Err(Status::not_found(format!(
                "no content item with id {}",
                req.id
            ))),
        }
    }

    async fn list_content_by_owner(
        &self,
        request: Request<pb::ListContentByOwnerRequest>,
    ) -> Result<Response<pb::ContentItemList>, Status> {
        let req = request.into_inner();
        let docs = self
            .contents
            .find_eq("owner_id", &req.owner_id)
            .map_err(storage_failure)?;
        Ok(Response::new(pb::ContentItemList {
            items: docs.iter().map(content_item).collect(),
        }))
    }

    async fn list_content_by_category(
        &self,
        request: Request<pb::ListContentByCategoryRequest>,
    ) -> Result<Response<pb::ContentItemList>, Status> {
        let req = request.into_inner();
        let docs = self
            .contents
            .find_eq("category", &req.category)
            .map_err(storage_failure)?;
        Ok(Response::new(pb::ContentItemList {
            items: docs.iter().map(content_item).collect(),
        }))
    }

    async fn list_annotations_for_content(
        &self,
        request: Request<pb::ListAnnotationsForContentRequest>,
    ) -> Result<Response<annotation_pb::AnnotationList>, Status> {
        let req = request.into_inner();
        let docs = self
            .annotations
            .find_eq("content_id", &req.content_id)
            .map_err(storage_failure)?;
        Ok(Response::new(annotation_pb::AnnotationList {
            items: docs.iter().map(annotation).collect(),
        }))
    }
}
