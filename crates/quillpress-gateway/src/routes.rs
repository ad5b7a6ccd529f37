use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use quillpress_protocol::pb::annotation::v1 as annotation_pb;
use quillpress_protocol::pb::content::v1 as content_pb;
use quillpress_protocol::pb::identity::v1 as identity_pb;

use crate::backends::Backends;
use crate::config::GatewayConfig;
use crate::error::GatewayError;

type GatewayResult<T> = Result<Json<T>, GatewayError>;

// Request bodies are validated against the wire schema here, before any RPC
// is made: unknown fields and missing required fields are rejected. The
// composed route keeps the legacy `{title, content}` body; its `content`
// field maps to the wire field `body`.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateUserBody {
    display_name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateUserBody {
    display_name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateUserBlogBody {
    title: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateBlogBody {
    title: String,
    body: String,
    owner_id: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateBlogBody {
    title: Option<String>,
    body: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreateCommentBody {
    body: String,
    owner_id: String,
    content_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateCommentBody {
    body: Option<String>,
}

pub fn router(cfg: &GatewayConfig, backends: Backends) -> Router {
    Router::new()
        .route("/user", get(get_user))
        .route("/users", post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/users/:id/blogs", post(create_user_blog))
        .route("/blog", get(get_blog))
        .route("/blogs", post(create_blog))
        .route("/blogs/:id", put(update_blog).delete(delete_blog))
        .route("/blogs/:id/comments", get(list_blog_comments))
        .route("/blogs/user/:userId", get(list_blogs_by_user))
        .route("/blogs/category/:category", get(list_blogs_by_category))
        .route("/comment", get(get_comment))
        .route("/comments", post(create_comment))
        .route("/comments/:id", put(update_comment).delete(delete_comment))
        .layer(RequestBodyLimitLayer::new(cfg.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(backends)
}

pub async fn serve(
    listener: tokio::net::TcpListener,
    cfg: &GatewayConfig,
    backends: Backends,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(cfg, backends))
        .with_graceful_shutdown(shutdown)
        .await
}

// Identity routes.

async fn get_user(State(backends): State<Backends>) -> GatewayResult<identity_pb::Identity> {
    // The legacy surface exposes no key parameter here; the empty id simply
    // resolves to NotFound at the service.
    let response = backends
        .identity
        .clone()
        .get_identity(identity_pb::GetIdentityRequest { id: String::new() })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn create_user(
    State(backends): State<Backends>,
    Json(body): Json<CreateUserBody>,
) -> GatewayResult<identity_pb::Identity> {
    let response = backends
        .identity
        .clone()
        .create_identity(identity_pb::CreateIdentityRequest {
            display_name: body.display_name,
            email: body.email,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn update_user(
    State(backends): State<Backends>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> GatewayResult<identity_pb::Identity> {
    let response = backends
        .identity
        .clone()
        .update_identity(identity_pb::UpdateIdentityRequest {
            id,
            display_name: body.display_name,
            email: body.email,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn delete_user(
    State(backends): State<Backends>,
    Path(id): Path<String>,
) -> GatewayResult<identity_pb::Identity> {
    let response = backends
        .identity
        .clone()
        .delete_identity(identity_pb::DeleteIdentityRequest { id })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn create_user_blog(
    State(backends): State<Backends>,
    Path(id): Path<String>,
    Json(body): Json<CreateUserBlogBody>,
) -> GatewayResult<content_pb::ContentItem> {
    let response = backends
        .identity
        .clone()
        .create_content_for_identity(identity_pb::CreateContentForIdentityRequest {
            identity_id: id,
            title: body.title,
            body: body.content,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

// Content routes.

async fn get_blog(State(backends): State<Backends>) -> GatewayResult<content_pb::ContentItem> {
    let response = backends
        .content
        .clone()
        .get_content(content_pb::GetContentRequest { id: String::new() })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn create_blog(
    State(backends): State<Backends>,
    Json(body): Json<CreateBlogBody>,
) -> GatewayResult<content_pb::ContentItem> {
    let response = backends
        .content
        .clone()
        .create_content(content_pb::CreateContentRequest {
            title: body.title,
            body: body.body,
            owner_id: body.owner_id,
            category: body.category,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn update_blog(
    State(backends): State<Backends>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBlogBody>,
) -> GatewayResult<content_pb::ContentItem> {
    let response = backends
        .content
        .clone()
        .update_content(content_pb::UpdateContentRequest {
            id,
            title: body.title,
            body: body.body,
            category: body.category,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn delete_blog(
    State(backends): State<Backends>,
    Path(id): Path<String>,
) -> GatewayResult<content_pb::ContentItem> {
    let response = backends
        .content
        .clone()
        .delete_content(content_pb::DeleteContentRequest { id })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn list_blogs_by_user(
    State(backends): State<Backends>,
    Path(user_id): Path<String>,
) -> GatewayResult<content_pb::ContentItemList> {
    let response = backends
        .content
        .clone()
        .list_content_by_owner(content_pb::ListContentByOwnerRequest { owner_id: user_id })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn list_blogs_by_category(
    State(backends): State<Backends>,
    Path(category): Path<String>,
) -> GatewayResult<content_pb::ContentItemList> {
    let response = backends
        .content
        .clone()
        .list_content_by_category(content_pb::ListContentByCategoryRequest { category })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn list_blog_comments(
    State(backends): State<Backends>,
    Path(id): Path<String>,
) -> GatewayResult<annotation_pb::AnnotationList> {
    let response = backends
        .content
        .clone()
        .list_annotations_for_content(content_pb::ListAnnotationsForContentRequest {
            content_id: id,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

// Annotation routes.

async fn get_comment(
    State(backends): State<Backends>,
) -> GatewayResult<annotation_pb::Annotation> {
    let response = backends
        .annotation
        .clone()
        .get_annotation(annotation_pb::GetAnnotationRequest { id: String::new() })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn create_comment(
    State(backends): State<Backends>,
    Json(body): Json<CreateCommentBody>,
) -> GatewayResult<annotation_pb::Annotation> {
    let response = backends
        .annotation
        .clone()
        .create_annotation(annotation_pb::CreateAnnotationRequest {
            body: body.body,
            owner_id: body.owner_id,
            content_id: body.content_id,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn update_comment(
    State(backends): State<Backends>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCommentBody>,
) -> GatewayResult<annotation_pb::Annotation> {
    let response = backends
        .annotation
        .clone()
        .update_annotation(annotation_pb::UpdateAnnotationRequest {
            id,
            body: body.body,
        })
        .await?;
    Ok(Json(response.into_inner()))
}

async fn delete_comment(
    State(backends): State<Backends>,
    Path(id): Path<String>,
) -> GatewayResult<annotation_pb::Annotation> {
    let response = backends
        .annotation
        .clone()
        .delete_annotation(annotation_pb::DeleteAnnotationRequest { id })
        .await?;
    Ok(Json(response.into_inner()))
}
