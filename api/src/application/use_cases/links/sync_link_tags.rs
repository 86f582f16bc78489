use uuid::Uuid;

use crate::application::dto::tags::TagRefDto;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::services::associations;

pub struct SyncLinkTags<'a, R, T>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    pub links: &'a R,
    pub tags: &'a T,
}

impl<'a, R, T> SyncLinkTags<'a, R, T>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    /// Returns the tags now on the link, or None if the link is not owned.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        link_id: i64,
        tag_ids: &[i64],
    ) -> anyhow::Result<Option<Vec<TagRefDto>>> {
        let applied =
            associations::sync_tags(self.links, self.tags, owner_id, link_id, tag_ids).await?;
        Ok(applied.map(|tags| {
            tags.into_iter()
                .map(|t| TagRefDto {
                    id: t.id,
                    name: t.name,
                })
                .collect()
        }))
    }
}
