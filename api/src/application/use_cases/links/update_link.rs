use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::title_lookup::TitleLookup;
use crate::application::use_cases::links::prepare::prepare_write;
use crate::application::validation::{CommandError, LinkInput};

pub struct UpdateLink<'a, R, T, G, L>
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

impl<'a, R, T, G, L> UpdateLink<'a, R, T, G, L>
where
    R: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
    G: GroupRepository + ?Sized,
    L: TitleLookup + ?Sized,
{
    /// Full replace of title, url, tags and groups. Ok(false) when the link
    /// does not exist for this owner.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        id: i64,
        input: &LinkInput,
    ) -> Result<bool, CommandError> {
        let existing = self
            .links
            .get_for_owner(id, owner_id)
            .await
            .map_err(CommandError::Storage)?;
        if existing.is_none() {
            return Ok(false);
        }

        let write = prepare_write(self.tags, self.groups, self.titles, owner_id, input).await?;
        let updated = self
            .links
            .update_for_owner(id, owner_id, &write)
            .await
            .map_err(CommandError::Storage)?;
        if updated.is_some() {
            tracing::info!(owner_id = %owner_id, link_id = id, "link_updated");
        }
        Ok(updated.is_some())
    }
}
