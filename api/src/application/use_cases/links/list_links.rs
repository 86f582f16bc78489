use uuid::Uuid;

use crate::application::dto::links::{LinkIndexDto, LinkPageDto};
use crate::application::dto::tags::TagItemDto;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::services::link_view::{self, UrlDisplay};
use crate::domain::links::filter::{LinkFilter, PageRequest};

#[derive(Debug, Clone, Default)]
pub struct LinkListQuery {
    pub search: Option<String>,
    pub tags: Vec<i64>,
    pub untagged_only: bool,
    pub page: Option<i64>,
}

pub struct ListLinks<'a, R, T>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub links: &'a R,
    pub tags: &'a T,
}

impl<'a, R, T> ListLinks<'a, R, T>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub async fn execute(&self, owner_id: Uuid, query: &LinkListQuery) -> anyhow::Result<LinkIndexDto> {
        let filter = LinkFilter::for_links(
            owner_id,
            query.search.as_deref(),
            &query.tags,
            query.untagged_only,
        );
        let page = PageRequest::new(query.page);
        let rows = self.links.page_filtered(&filter, page).await?;

        let items = rows
            .items
            .into_iter()
            .map(|l| link_view::list_item(l, UrlDisplay::HostOnly))
            .collect();
        let catalog = self
            .tags
            .list_with_counts(owner_id)
            .await?
            .into_iter()
            .map(|u| TagItemDto {
                id: u.tag.id,
                name: u.tag.name,
                count: u.count,
            })
            .collect();

        Ok(LinkIndexDto {
            links: LinkPageDto {
                items,
                current_page: page.page,
                last_page: page.last_page(rows.total),
                per_page: page.per_page,
                total: rows.total,
            },
            tags: catalog,
        })
    }
}
