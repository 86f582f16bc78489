use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::title_lookup::TitleLookup;
use crate::application::services::associations;
use crate::application::validation::{self, CommandError, LinkInput};
use crate::domain::links::link::LinkWrite;

/// Shared by create and update: validate, check group ownership, default the
/// title through the lookup and resolve tags. Nothing is written here.
pub async fn prepare_write<T, G, L>(
    tags: &T,
    groups: &G,
    titles: &L,
    owner_id: Uuid,
    input: &LinkInput,
) -> Result<LinkWrite, CommandError>
where
    T: TagRepository + ?Sized,
    G: GroupRepository + ?Sized,
    L: TitleLookup + ?Sized,
{
    let valid = validation::validate_link_input(input)?;

    let group_ids = associations::ensure_groups_owned(groups, owner_id, &valid.groups)
        .await
        .map_err(CommandError::Storage)??;

    let title = if valid.title.is_empty() {
        let looked_up = validation::truncate_title(&titles.title_for(&valid.url).await);
        if looked_up.is_empty() {
            tracing::debug!(owner_id = %owner_id, url = %valid.url, "link_title_lookup_empty");
        }
        looked_up
    } else {
        valid.title
    };

    let resolved = associations::resolve_owned_tags(tags, owner_id, &valid.tags)
        .await
        .map_err(CommandError::Storage)?;

    Ok(LinkWrite {
        title,
        url: valid.url,
        tag_ids: resolved.ids(),
        group_ids,
    })
}
