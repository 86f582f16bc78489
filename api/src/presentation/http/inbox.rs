use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::inbox::list_inbox::{InboxQuery, ListInbox};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, current_user};
use crate::presentation::http::error::{ApiError, storage_failed};
use crate::presentation::http::links::LinkListItem;
use crate::presentation::http::query;

#[derive(Debug, Serialize, ToSchema)]
pub struct InboxResponse {
    pub links: Vec<LinkListItem>,
    pub search: String,
}

pub fn parse_inbox_query(pairs: Vec<(String, String)>) -> InboxQuery {
    let mut q = InboxQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            "search" => q.search = Some(value),
            "untagged" => q.untagged = query::parse_flag(&value),
            "ungrouped" => q.ungrouped = query::parse_flag(&value),
            _ => {}
        }
    }
    q
}

#[utoipa::path(get, path = "/api/inbox", tag = "Inbox",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or url"),
        ("untagged" = Option<bool>, Query, description = "Only links without tags (default true)"),
        ("ungrouped" = Option<bool>, Query, description = "Only links without groups (default true)")
    ),
    responses((status = 200, body = InboxResponse)))]
pub async fn list_inbox(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<InboxResponse>, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let q = parse_inbox_query(pairs);
    let repo = ctx.link_repo();
    let uc = ListInbox {
        repo: repo.as_ref(),
    };
    let out = uc
        .execute(user_id, &q)
        .await
        .map_err(|e| storage_failed(e, "list_inbox"))?;
    Ok(Json(InboxResponse {
        links: out.links.into_iter().map(Into::into).collect(),
        search: out.search,
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/inbox", get(list_inbox)).with_state(ctx)
}
