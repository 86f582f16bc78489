use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::title_lookup::TitleLookup;
use crate::application::use_cases::links::prepare::prepare_write;
use crate::application::validation::{CommandError, LinkInput};

pub struct CreateLink<'a, R, T, G, L>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
    G: GroupRepository + ?Sized,
    L: TitleLookup + ?Sized,
{
    pub links: &'a R,
    pub tags: &'a T,
    pub groups: &'a G,
    pub titles: &'a L,
}

impl<'a, R, T, G, L> CreateLink<'a, R, T, G, L>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
    G: GroupRepository + ?Sized,
    L: TitleLookup + ?Sized,
{
    /// Returns the id of the new link.
    pub async fn execute(&self, owner_id: Uuid, input: &LinkInput) -> Result<i64, CommandError> {
        let write = prepare_write(self.tags, self.groups, self.titles, owner_id, input).await?;
        let link = self
            .links
            .create_for_owner(owner_id, &write)
            .await
            .map_err(CommandError::Storage)?;
        tracing::info!(
            owner_id = %owner_id,
            link_id = link.id,
            tags = write.tag_ids.len(),
            groups = write.group_ids.len(),
            "link_created"
        );
        Ok(link.id)
    }
}
