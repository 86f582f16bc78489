use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::groups::GroupItemDto;
use crate::application::use_cases::groups::create_group::CreateGroup;
use crate::application::use_cases::groups::list_groups::ListGroups;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, current_user};
use crate::presentation::http::error::{
    ApiError, ValidationErrorBody, command_failed, storage_failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupItem {
    pub id: i64,
    pub title: String,
}

impl From<GroupItemDto> for GroupItem {
    fn from(d: GroupItemDto) -> Self {
        GroupItem {
            id: d.id,
            title: d.title,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub title: String,
}

#[utoipa::path(get, path = "/api/groups", tag = "Groups",
    responses((status = 200, body = [GroupItem])))]
pub async fn list_groups(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<GroupItem>>, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.group_repo();
    let uc = ListGroups {
        repo: repo.as_ref(),
    };
    let items = uc
        .execute(user_id)
        .await
        .map_err(|e| storage_failed(e, "list_groups"))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/groups", tag = "Groups", request_body = CreateGroupRequest,
    responses(
        (status = 201, body = GroupItem),
        (status = 422, body = ValidationErrorBody)
    ))]
pub async fn create_group(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupItem>), ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.group_repo();
    let uc = CreateGroup {
        repo: repo.as_ref(),
    };
    let group = uc
        .execute(user_id, &req.title)
        .await
        .map_err(|e| command_failed(e, "create_group"))?;
    Ok((StatusCode::CREATED, Json(group.into())))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .with_state(ctx)
}
