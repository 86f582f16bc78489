use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::links::{LinkDetailDto, LinkListItemDto, LinkPageDto};
use crate::application::use_cases::links::create_link::CreateLink;
use crate::application::use_cases::links::delete_link::DeleteLink;
use crate::application::use_cases::links::get_link::{GetLink, LinkLookup};
use crate::application::use_cases::links::list_links::{LinkListQuery, ListLinks};
use crate::application::use_cases::links::sync_link_groups::SyncLinkGroups;
use crate::application::use_cases::links::sync_link_tags::SyncLinkTags;
use crate::application::use_cases::links::update_link::UpdateLink;
use crate::application::validation::LinkInput;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, current_user};
use crate::presentation::http::error::{
    ApiError, ValidationErrorBody, command_failed, storage_failed,
};
use crate::presentation::http::groups::GroupItem;
use crate::presentation::http::query;
use crate::presentation::http::tags::{TagItem, TagRef};

pub const LINKS_PATH: &str = "/api/links";

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkListItem {
    pub id: i64,
    pub title: String,
    /// Bare url in the inbox, hostname only in the link index
    pub link: String,
}

impl From<LinkListItemDto> for LinkListItem {
    fn from(d: LinkListItemDto) -> Self {
        LinkListItem {
            id: d.id,
            title: d.title,
            link: d.link,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkPage {
    pub data: Vec<LinkListItem>,
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkIndexResponse {
    pub links: LinkPage,
    pub tags: Vec<TagItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkDetail {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub tags: Vec<TagRef>,
    pub link_groups: Vec<GroupItem>,
    pub groups: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
    pub created_at_with_time: String,
    pub updated_at_with_time: String,
}

impl From<LinkDetailDto> for LinkDetail {
    fn from(d: LinkDetailDto) -> Self {
        LinkDetail {
            id: d.id,
            title: d.title,
            link: d.link,
            tags: d.tags.into_iter().map(Into::into).collect(),
            link_groups: d.link_groups.into_iter().map(Into::into).collect(),
            groups: d.groups,
            created_at: d.created_at,
            updated_at: d.updated_at,
            created_at_with_time: d.created_at_with_time,
            updated_at_with_time: d.updated_at_with_time,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LinkRequest {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<i64>>,
    pub groups: Option<Vec<i64>>,
}

impl From<LinkRequest> for LinkInput {
    fn from(r: LinkRequest) -> Self {
        LinkInput {
            title: r.title,
            link: r.link,
            tags: r.tags.unwrap_or_default(),
            groups: r.groups.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncTagsRequest {
    #[serde(default)]
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncGroupsRequest {
    #[serde(default)]
    pub groups: Vec<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route(
            "/links/:id",
            get(get_link).put(update_link).delete(delete_link),
        )
        .route("/links/:id/tags", put(sync_link_tags))
        .route("/links/:id/groups", put(sync_link_groups))
        .with_state(ctx)
}

pub fn parse_list_query(pairs: Vec<(String, String)>) -> LinkListQuery {
    let mut q = LinkListQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            "search" => q.search = Some(value),
            "tags[]" | "tags" => {
                if let Ok(id) = value.trim().parse::<i64>() {
                    q.tags.push(id);
                }
            }
            "untaggedOnly" => q.untagged_only = query::parse_flag(&value).unwrap_or(false),
            "page" => q.page = value.trim().parse().ok(),
            _ => {}
        }
    }
    q
}

/// Index url for `page` carrying the active filters.
pub fn page_url(q: &LinkListQuery, page: i64) -> String {
    let mut qs = String::new();
    if let Some(search) = q.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query::encode_pair(&mut qs, "search", search);
    }
    for id in &q.tags {
        query::encode_pair(&mut qs, "tags[]", &id.to_string());
    }
    if q.untagged_only {
        query::encode_pair(&mut qs, "untaggedOnly", "1");
    }
    query::encode_pair(&mut qs, "page", &page.to_string());
    format!("{LINKS_PATH}?{qs}")
}

fn to_page(q: &LinkListQuery, p: LinkPageDto) -> LinkPage {
    let next_page_url = p.has_next().then(|| page_url(q, p.current_page + 1));
    let prev_page_url = p
        .has_prev()
        .then(|| page_url(q, (p.current_page - 1).min(p.last_page)));
    LinkPage {
        data: p.items.into_iter().map(Into::into).collect(),
        current_page: p.current_page,
        last_page: p.last_page,
        per_page: p.per_page,
        total: p.total,
        next_page_url,
        prev_page_url,
    }
}

#[utoipa::path(get, path = "/api/links", tag = "Links",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or url"),
        ("tags[]" = Option<Vec<i64>>, Query, description = "Links carrying any of these tags"),
        ("untaggedOnly" = Option<bool>, Query, description = "Only links without tags; overrides tags[]"),
        ("page" = Option<i64>, Query, description = "1-based page, 20 per page")
    ),
    responses((status = 200, body = LinkIndexResponse)))]
pub async fn list_links(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LinkIndexResponse>, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let q = parse_list_query(pairs);
    let links = ctx.link_repo();
    let tags = ctx.tag_repo();
    let uc = ListLinks {
        links: links.as_ref(),
        tags: tags.as_ref(),
    };
    let out = uc
        .execute(user_id, &q)
        .await
        .map_err(|e| storage_failed(e, "list_links"))?;
    Ok(Json(LinkIndexResponse {
        links: to_page(&q, out.links),
        tags: out.tags.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/links", tag = "Links", request_body = LinkRequest,
    responses(
        (status = 201, body = CreatedResponse),
        (status = 422, body = ValidationErrorBody)
    ))]
pub async fn create_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<LinkRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let links = ctx.link_repo();
    let tags = ctx.tag_repo();
    let groups = ctx.group_repo();
    let titles = ctx.title_lookup();
    let uc = CreateLink {
        links: links.as_ref(),
        tags: tags.as_ref(),
        groups: groups.as_ref(),
        titles: titles.as_ref(),
    };
    let id = uc
        .execute(user_id, &req.into())
        .await
        .map_err(|e| command_failed(e, "create_link"))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(get, path = "/api/links/{id}", tag = "Links",
    params(("id" = i64, Path, description = "Link id")),
    responses(
        (status = 200, body = LinkDetail),
        (status = 303, description = "Not found; redirects to the link index")
    ))]
pub async fn get_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.link_repo();
    let uc = GetLink {
        repo: repo.as_ref(),
    };
    match uc
        .execute(user_id, id)
        .await
        .map_err(|e| storage_failed(e, "get_link"))?
    {
        LinkLookup::Found(dto) => Ok(Json(LinkDetail::from(*dto)).into_response()),
        LinkLookup::Redirect => Ok(Redirect::to(LINKS_PATH).into_response()),
    }
}

#[utoipa::path(put, path = "/api/links/{id}", tag = "Links", request_body = LinkRequest,
    params(("id" = i64, Path, description = "Link id")),
    responses(
        (status = 204),
        (status = 404),
        (status = 422, body = ValidationErrorBody)
    ))]
pub async fn update_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<LinkRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let links = ctx.link_repo();
    let tags = ctx.tag_repo();
    let groups = ctx.group_repo();
    let titles = ctx.title_lookup();
    let uc = UpdateLink {
        links: links.as_ref(),
        tags: tags.as_ref(),
        groups: groups.as_ref(),
        titles: titles.as_ref(),
    };
    let updated = uc
        .execute(user_id, id, &req.into())
        .await
        .map_err(|e| command_failed(e, "update_link"))?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND.into())
    }
}

#[utoipa::path(delete, path = "/api/links/{id}", tag = "Links",
    params(("id" = i64, Path, description = "Link id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let repo = ctx.link_repo();
    let uc = DeleteLink {
        repo: repo.as_ref(),
    };
    let deleted = uc
        .execute(user_id, id)
        .await
        .map_err(|e| storage_failed(e, "delete_link"))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND.into())
    }
}

#[utoipa::path(put, path = "/api/links/{id}/tags", tag = "Links", request_body = SyncTagsRequest,
    params(("id" = i64, Path, description = "Link id")),
    responses((status = 204), (status = 404)))]
pub async fn sync_link_tags(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<SyncTagsRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let links = ctx.link_repo();
    let tags = ctx.tag_repo();
    let uc = SyncLinkTags {
        links: links.as_ref(),
        tags: tags.as_ref(),
    };
    uc.execute(user_id, id, &req.tags)
        .await
        .map_err(|e| storage_failed(e, "sync_link_tags"))?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/api/links/{id}/groups", tag = "Links", request_body = SyncGroupsRequest,
    params(("id" = i64, Path, description = "Link id")),
    responses(
        (status = 204),
        (status = 404),
        (status = 422, body = ValidationErrorBody)
    ))]
pub async fn sync_link_groups(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i64>,
    Json(req): Json<SyncGroupsRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = current_user(&ctx.cfg, bearer)?;
    let links = ctx.link_repo();
    let groups = ctx.group_repo();
    let uc = SyncLinkGroups {
        links: links.as_ref(),
        groups: groups.as_ref(),
    };
    let synced = uc
        .execute(user_id, id, &req.groups)
        .await
        .map_err(|e| command_failed(e, "sync_link_groups"))?;
    if synced {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(qs: &str) -> LinkListQuery {
        let uri: axum::http::Uri = format!("/api/links?{qs}").parse().unwrap();
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).unwrap();
        parse_list_query(pairs)
    }

    #[test]
    fn parses_repeated_tags_in_both_spellings() {
        let q = parsed(
            "search=go+tour&tags%5B%5D=2&tags[]=5&tags=9&tags[]=x&untaggedOnly=on&page=3",
        );
        assert_eq!(q.search.as_deref(), Some("go tour"));
        assert_eq!(q.tags, vec![2, 5, 9]);
        assert!(q.untagged_only);
        assert_eq!(q.page, Some(3));
    }

    #[test]
    fn missing_or_bad_values_use_defaults() {
        let q = parsed("page=abc&untaggedOnly=perhaps");
        assert_eq!(q.page, None);
        assert!(!q.untagged_only);
        assert!(q.tags.is_empty());
        assert!(parsed("").search.is_none());
    }

    #[test]
    fn page_urls_carry_filters() {
        let q = LinkListQuery {
            search: Some("rust & go".into()),
            tags: vec![1, 4],
            untagged_only: true,
            page: Some(2),
        };
        assert_eq!(
            page_url(&q, 3),
            "/api/links?search=rust%20%26%20go&tags%5B%5D=1&tags%5B%5D=4&untaggedOnly=1&page=3"
        );
        assert_eq!(page_url(&LinkListQuery::default(), 1), "/api/links?page=1");
    }

    #[test]
    fn page_urls_round_trip_through_the_parser() {
        let q = LinkListQuery {
            search: Some("50% off".into()),
            tags: vec![7],
            untagged_only: false,
            page: None,
        };
        let url = page_url(&q, 2);
        let back = parsed(url.split_once('?').map_or("", |(_, qs)| qs));
        assert_eq!(back.search, q.search);
        assert_eq!(back.tags, q.tags);
        assert_eq!(back.page, Some(2));
    }

    #[test]
    fn next_and_prev_follow_position() {
        let q = LinkListQuery::default();
        let dto = |current_page| LinkPageDto {
            items: Vec::new(),
            current_page,
            last_page: 3,
            per_page: 20,
            total: 45,
        };
        let first = to_page(&q, dto(1));
        assert_eq!(first.next_page_url.as_deref(), Some("/api/links?page=2"));
        assert!(first.prev_page_url.is_none());
        let last = to_page(&q, dto(3));
        assert!(last.next_page_url.is_none());
        assert_eq!(last.prev_page_url.as_deref(), Some("/api/links?page=2"));
        let past = to_page(&q, dto(9));
        assert_eq!(past.prev_page_url.as_deref(), Some("/api/links?page=3"));
    }

    #[test]
    fn request_lists_default_to_empty() {
        let req: LinkRequest = serde_json::from_str(r#"{"link":"https://a.example","tags":null}"#).unwrap();
        let input: LinkInput = req.into();
        assert!(input.tags.is_empty());
        assert!(input.groups.is_empty());
        assert!(input.title.is_none());
    }
}
