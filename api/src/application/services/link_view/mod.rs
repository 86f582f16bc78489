use chrono::{DateTime, Utc};

use crate::application::dto::groups::GroupItemDto;
use crate::application::dto::links::{LinkDetailDto, LinkListItemDto};
use crate::application::dto::tags::TagRefDto;
use crate::domain::groups::group::Group;
use crate::domain::links::link::Link;
use crate::domain::links::timestamps;
use crate::domain::tags::tag::Tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlDisplay {
    Full,
    HostOnly,
}

pub fn list_item(link: Link, display: UrlDisplay) -> LinkListItemDto {
    let shown = match display {
        UrlDisplay::Full => link.url,
        UrlDisplay::HostOnly => host_of(&link.url).unwrap_or(link.url),
    };
    LinkListItemDto {
        id: link.id,
        title: link.title,
        link: shown,
    }
}

pub fn detail(link: Link, tags: Vec<Tag>, groups: Vec<Group>, now: DateTime<Utc>) -> LinkDetailDto {
    let mut tags: Vec<TagRefDto> = tags
        .into_iter()
        .map(|t| TagRefDto {
            id: t.id,
            name: t.name,
        })
        .collect();
    tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    let mut group_ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
    group_ids.sort_unstable();

    let mut link_groups: Vec<GroupItemDto> = groups
        .into_iter()
        .map(|g| GroupItemDto {
            id: g.id,
            title: g.title,
        })
        .collect();
    link_groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

    LinkDetailDto {
        id: link.id,
        title: link.title,
        link: link.url,
        tags,
        link_groups,
        groups: group_ids,
        created_at: timestamps::for_humans(link.created_at, now),
        updated_at: timestamps::for_humans(link.updated_at, now),
        created_at_with_time: timestamps::with_time(link.created_at),
        updated_at_with_time: timestamps::with_time(link.updated_at),
    }
}

pub fn host_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .filter(|h| !h.is_empty())
}
