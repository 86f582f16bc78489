use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::groups::group::Group;
use crate::domain::links::filter::{LinkFilter, PageRequest};
use crate::domain::links::link::{Link, LinkWrite};
use crate::domain::tags::tag::Tag;

#[derive(Debug, Clone)]
pub struct LinkPage {
    pub items: Vec<Link>,
    pub total: i64,
}

#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn list_filtered(&self, filter: &LinkFilter) -> anyhow::Result<Vec<Link>>;

    async fn page_filtered(
        &self,
        filter: &LinkFilter,
        page: PageRequest,
    ) -> anyhow::Result<LinkPage>;

    async fn get_for_owner(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Link>>;

    async fn tags_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Tag>>;

    async fn groups_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Group>>;

    // Link row and both association sets are written in one transaction
    async fn create_for_owner(&self, owner_id: Uuid, write: &LinkWrite) -> anyhow::Result<Link>;

    // Returns None if not found/unauthorized; otherwise same atomicity as create
    async fn update_for_owner(
        &self,
        id: i64,
        owner_id: Uuid,
        write: &LinkWrite,
    ) -> anyhow::Result<Option<Link>>;

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool>;

    // Replace-all of a single association set; false if the link is not owned
    async fn replace_tags(&self, id: i64, owner_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<bool>;

    async fn replace_groups(
        &self,
        id: i64,
        owner_id: Uuid,
        group_ids: &[i64],
    ) -> anyhow::Result<bool>;
}
