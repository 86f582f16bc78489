use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::services::associations;
use crate::application::validation::CommandError;

pub struct SyncLinkGroups<'a, R, G>
where
    R: LinkRepository + ?Sized,
    G: GroupRepository + ?Sized,
{
    pub links: &'a R,
    pub groups: &'a G,
}

impl<'a, R, G> SyncLinkGroups<'a, R, G>
where
    R: LinkRepository + ?Sized,
    G: GroupRepository + ?Sized,
{
    /// Ok(false) when the link is not owned.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        link_id: i64,
        group_ids: &[i64],
    ) -> Result<bool, CommandError> {
        let owned = self
            .links
            .get_for_owner(link_id, owner_id)
            .await
            .map_err(CommandError::Storage)?;
        if owned.is_none() {
            return Ok(false);
        }
        let group_ids = associations::ensure_groups_owned(self.groups, owner_id, group_ids)
            .await
            .map_err(CommandError::Storage)??;
        associations::sync_groups(self.links, owner_id, link_id, &group_ids)
            .await
            .map_err(CommandError::Storage)
    }
}
