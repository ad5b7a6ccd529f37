use serde_json::{Map, Value};
use tonic::{Request, Response, Status};

use quillpress_core::{Collection, Document, DocumentStore, StoreError};
use quillpress_protocol::pb::content::v1 as content_pb;
use quillpress_protocol::pb::identity::v1 as pb;

use crate::relay::ContentRelay;
use pb::identity_service_server::IdentityService;

#[derive(Debug, Clone)]
pub struct IdentityHandler {
    identities: Collection,
    content: ContentRelay,
}

impl IdentityHandler {
    pub fn build(data_dir: &str, content: ContentRelay) -> Result<Self, StoreError> {
        let store = DocumentStore::open(data_dir)?;
        Ok(Self {
            identities: store.collection("identities"),
            content,
        })
    }
}

fn storage_failure(err: StoreError) -> Status {
    tracing::error!(error = %err, "document store failure");
    Status::internal(err.to_string())
}

fn identity(doc: &Document) -> pb::Identity {
    pb::Identity {
        id: doc.id.clone(),
        display_name: doc.str_field("display_name"),
        email: doc.str_field("email"),
    }
}

#[tonic::async_trait]
impl IdentityService for IdentityHandler {
    async fn get_identity(
        &self,
        request: Request<pb::GetIdentityRequest>,
    ) -> Result<Response<pb::Identity>, Status> {
        let req = request.into_inner();
        match self.identities.get(&req.id).map_err(storage_failure)? {
            Some(doc) => Ok(Response::new(identity(&doc))),
            None => Err(Status::not_found(format!("no identity with id {}", req.id))),
        }
    }

    async fn create_identity(
        &self,
        request: Request<pb::CreateIdentityRequest>,
    ) -> Result<Response<pb::Identity>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        fields.insert(
            "display_name".to_string(),
            Value::String(req.display_name.clone()),
        );
        fields.insert("email".to_string(), Value::String(req.email.clone()));
        let id = self.identities.insert(fields).map_err(storage_failure)?;
        tracing::info!(%id, "created identity");

        // At-creation snapshot: assigned id plus the request fields, never a
        // re-read from storage.
        Ok(Response::new(pb::Identity {
            id,
            display_name: req.display_name,
            email: req.email,
        }))
    }

    async fn update_identity(
        &self,
        request: Request<pb::UpdateIdentityRequest>,
    ) -> Result<Response<pb::Identity>, Status> {
        let req = request.into_inner();
        let mut fields = Map::new();
        if let Some(display_name) = req.display_name {
            fields.insert("display_name".to_string(), Value::String(display_name));
        }
        if let Some(email) = req.email {
            fields.insert("email".to_string(), Value::String(email));
        }
        match self
            .identities
            .update(&req.id, fields)
            .map_err(storage_failure)?
        {
            Some(doc) => Ok(Response::new(identity(&doc))),
            None => Err(Status::not_found(format!("no identity with id {}", req.id))),
        }
    }

    async fn delete_identity(
        &self,
        request: Request<pb::DeleteIdentityRequest>,
    ) -> Result<Response<pb::Identity>, Status> {
        let req = request.into_inner();
        match self.identities.delete(&req.id).map_err(storage_failure)? {
            Some(doc) => {
                tracing::info!(id = %req.id, "deleted identity");
                Ok(Response::new(identity(&doc)))
            }
            None => Err(Status::not_found(format!("no identity with id {}", req.id))),
        }
    }

    async fn create_content_for_identity(
        &self,
        request: Request<pb::CreateContentForIdentityRequest>,
    ) -> Result<Response<content_pb::ContentItem>, Status> {
        let req = request.into_inner();
        // Pure relay: the content service owns the write, and its response
        // or failure passes through unchanged. The identity itself is not
        // looked up; owner_id is a soft reference.
        let created = self
            .content
            .create_content(content_pb::CreateContentRequest {
                title: req.title,
                body: req.body,
                owner_id: req.identity_id,
                category: String::new(),
            })
            .await?;
        Ok(Response::new(created))
    }
}
