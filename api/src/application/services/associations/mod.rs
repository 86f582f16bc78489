use std::collections::HashSet;

use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::validation::ValidationErrors;
use crate::domain::tags::tag::Tag;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTags {
    /// In request order, without duplicates.
    pub tags: Vec<Tag>,
    pub dropped: Vec<i64>,
}

impl ResolvedTags {
    pub fn ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Tolerant tag resolution: ids that are unknown or owned by someone else are
/// skipped rather than rejected.
pub async fn resolve_owned_tags<R: TagRepository + ?Sized>(
    repo: &R,
    owner_id: Uuid,
    requested: &[i64],
) -> anyhow::Result<ResolvedTags> {
    let wanted = distinct_ids(requested);
    if wanted.is_empty() {
        return Ok(ResolvedTags::default());
    }
    let found = repo.find_owned(owner_id, &wanted).await?;
    let mut tags = Vec::with_capacity(found.len());
    let mut dropped = Vec::new();
    for id in wanted {
        match found.iter().find(|t| t.id == id && t.owner_id == owner_id) {
            Some(tag) => tags.push(tag.clone()),
            None => dropped.push(id),
        }
    }
    if !dropped.is_empty() {
        tracing::debug!(owner_id = %owner_id, ?dropped, "tag_ids_not_resolved");
    }
    Ok(ResolvedTags { tags, dropped })
}

/// Order-preserving de-duplication.
pub fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Every requested group must belong to the owner. Errors are keyed by the
/// position in the submitted list.
pub async fn ensure_groups_owned<R: GroupRepository + ?Sized>(
    repo: &R,
    owner_id: Uuid,
    requested: &[i64],
) -> anyhow::Result<Result<Vec<i64>, ValidationErrors>> {
    let wanted = distinct_ids(requested);
    if wanted.is_empty() {
        return Ok(Ok(wanted));
    }
    let owned: HashSet<i64> = repo
        .find_owned(owner_id, &wanted)
        .await?
        .into_iter()
        .filter(|g| g.owner_id == owner_id)
        .map(|g| g.id)
        .collect();
    let mut errors = ValidationErrors::new();
    for (idx, id) in requested.iter().enumerate() {
        if !owned.contains(id) {
            errors.add(format!("groups.{idx}"), "The selected group is invalid.");
        }
    }
    Ok(errors.into_result(wanted))
}

/// Replaces the tag set of an owned link with the resolvable subset of
/// `requested`. Returns None when the link is not owned by `owner_id`.
pub async fn sync_tags<L, T>(
    links: &L,
    tags: &T,
    owner_id: Uuid,
    link_id: i64,
    requested: &[i64],
) -> anyhow::Result<Option<Vec<Tag>>>
where
    L: LinkRepository + ?Sized,
    T: TagRepository + ?Sized,
{
    let resolved = resolve_owned_tags(tags, owner_id, requested).await?;
    if !links.replace_tags(link_id, owner_id, &resolved.ids()).await? {
        return Ok(None);
    }
    Ok(Some(resolved.tags))
}

/// Replaces the group set of an owned link. Ids are taken as given; callers
/// validate ownership first.
pub async fn sync_groups<L: LinkRepository + ?Sized>(
    links: &L,
    owner_id: Uuid,
    link_id: i64,
    group_ids: &[i64],
) -> anyhow::Result<bool> {
    links
        .replace_groups(link_id, owner_id, &distinct_ids(group_ids))
        .await
}
