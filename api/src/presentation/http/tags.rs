use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::tags::{TagItemDto, TagRefDto};
use crate::application::use_cases::tags::create_tag::CreateTag;
use crate::application::use_cases::tags::list_tags::ListTags;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, current_user};
use crate::presentation::http::error::{
    ApiError, ValidationErrorBody, command_failed, storage_failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TagItem {
    pub id: i64,
    pub name: String,
    pub count: i64,
}

impl From<TagItemDto> for TagItem {
    fn from(d: TagItemDto) -> Self {
        TagItem {
            id: d.id,
            name: d.name,
            count: d.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

impl From<TagRefDto> for TagRef {
    fn from(d: TagRefDto) -> Self {
        TagRef {
            id: d.id,
            name: d.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
}

#[utoipa::path(get, path = "/api/tags", tag = "Tags",
    responses((status = 200, body = [TagItem])))]
pub async fn list_tags(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<TagItem>>, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.tag_repo();
    let uc = ListTags {
        repo: repo.as_ref(),
    };
    let items: Vec<TagItemDto> = uc
        .execute(user_id)
        .await
        .map_err(|e| storage_failed(e, "list_tags"))?;
    let out: Vec<TagItem> = items.into_iter().map(Into::into).collect();
    Ok(Json(out))
}

#[utoipa::path(post, path = "/api/tags", tag = "Tags", request_body = CreateTagRequest,
    responses(
        (status = 201, body = TagRef),
        (status = 422, body = ValidationErrorBody)
    ))]
pub async fn create_tag(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagRef>), ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.tag_repo();
    let uc = CreateTag {
        repo: repo.as_ref(),
    };
    let tag = uc
        .execute(user_id, &req.name)
        .await
        .map_err(|e| command_failed(e, "create_tag"))?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .with_state(ctx)
}
