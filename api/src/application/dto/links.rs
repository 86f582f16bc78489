use crate::application::dto::groups::GroupItemDto;
use crate::application::dto::tags::{TagItemDto, TagRefDto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkListItemDto {
    pub id: i64,
    pub title: String,
    /// Bare url or hostname, depending on the listing.
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct LinkDetailDto {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub tags: Vec<TagRefDto>,
    /// Sorted by title
    pub link_groups: Vec<GroupItemDto>,
    pub groups: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
    pub created_at_with_time: String,
    pub updated_at_with_time: String,
}

#[derive(Debug, Clone)]
pub struct LinkPageDto {
    pub items: Vec<LinkListItemDto>,
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl LinkPageDto {
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

#[derive(Debug, Clone)]
pub struct LinkIndexDto {
    pub links: LinkPageDto,
    pub tags: Vec<TagItemDto>,
}

#[derive(Debug, Clone)]
pub struct InboxDto {
    pub links: Vec<LinkListItemDto>,
    pub search: String,
}
