//! In-memory port implementations used by use case tests. Filtering mirrors
//! the Postgres adapter: owner scoping, tag/group existence, literal
//! case-insensitive substring search, newest first.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::application::ports::group_repository::GroupRepository;
use crate::application::ports::link_repository::{LinkPage, LinkRepository};
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::title_lookup::TitleLookup;
use crate::domain::groups::group::Group;
use crate::domain::links::filter::{LinkFilter, PageRequest, TagConstraint};
use crate::domain::links::link::{Link, LinkWrite};
use crate::domain::tags::tag::{Tag, TagUsage};

#[derive(Default)]
struct State {
    next_id: i64,
    clock: i64,
    links: HashMap<i64, Link>,
    tags: HashMap<i64, Tag>,
    groups: HashMap<i64, Group>,
    link_tags: HashMap<i64, BTreeSet<i64>>,
    link_groups: HashMap<i64, BTreeSet<i64>>,
    writes: usize,
    fail_association_writes: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // Each write is one minute after the previous one so ordering is stable.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        base_time() + Duration::minutes(self.clock)
    }

    /// Runs `f` against the link tables and restores them if it fails, like
    /// dropping an uncommitted transaction. Ids and the clock keep advancing.
    fn in_transaction<T>(
        &mut self,
        f: impl FnOnce(&mut State) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let snapshot = (
            self.links.clone(),
            self.link_tags.clone(),
            self.link_groups.clone(),
        );
        let out = f(self);
        if out.is_err() {
            (self.links, self.link_tags, self.link_groups) = snapshot;
        }
        out
    }

    // Tags are written before groups, so a failing group write leaves a
    // half-applied change for the transaction to undo.
    fn write_associations(
        &mut self,
        id: i64,
        tag_ids: &[i64],
        group_ids: &[i64],
    ) -> anyhow::Result<()> {
        self.link_tags.insert(id, tag_ids.iter().copied().collect());
        if self.fail_association_writes {
            anyhow::bail!("link_groups write failed for link {id}");
        }
        self.link_groups.insert(id, group_ids.iter().copied().collect());
        Ok(())
    }

    fn owns(&self, id: i64, owner_id: Uuid) -> bool {
        self.links
            .get(&id)
            .map(|l| l.owner_id == owner_id)
            .unwrap_or(false)
    }

    fn matches(&self, link: &Link, filter: &LinkFilter) -> bool {
        if link.owner_id != filter.owner_id {
            return false;
        }
        let tags = self.link_tags.get(&link.id);
        let tag_count = tags.map(|t| t.len()).unwrap_or(0);
        let tags_ok = match &filter.tags {
            TagConstraint::Any => true,
            TagConstraint::Untagged => tag_count == 0,
            TagConstraint::AnyOf(ids) => tags
                .map(|t| ids.iter().any(|id| t.contains(id)))
                .unwrap_or(false),
        };
        let groups_ok = !filter.ungrouped_only
            || self
                .link_groups
                .get(&link.id)
                .map(|g| g.is_empty())
                .unwrap_or(true);
        let search_ok = match filter.search.as_deref() {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                link.title.to_lowercase().contains(&needle)
                    || link.url.to_lowercase().contains(&needle)
            }
        };
        tags_ok && groups_ok && search_ok
    }

    fn filtered(&self, filter: &LinkFilter) -> Vec<Link> {
        let mut out: Vec<Link> = self
            .links
            .values()
            .filter(|l| self.matches(l, filter))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out
    }
}

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-01T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tag(&self, owner_id: Uuid, name: &str) -> Tag {
        let mut st = self.state.lock().unwrap();
        let tag = Tag {
            id: st.next_id(),
            owner_id,
            name: name.to_string(),
        };
        st.tags.insert(tag.id, tag.clone());
        tag
    }

    pub fn add_group(&self, owner_id: Uuid, title: &str) -> Group {
        let mut st = self.state.lock().unwrap();
        let group = Group {
            id: st.next_id(),
            owner_id,
            title: title.to_string(),
        };
        st.groups.insert(group.id, group.clone());
        group
    }

    /// Seeds a link without counting it as a write.
    pub fn add_link(
        &self,
        owner_id: Uuid,
        title: &str,
        url: &str,
        tag_ids: &[i64],
        group_ids: &[i64],
    ) -> Link {
        let mut st = self.state.lock().unwrap();
        let at = st.tick();
        let link = Link {
            id: st.next_id(),
            owner_id,
            title: title.to_string(),
            url: url.to_string(),
            created_at: at,
            updated_at: at,
        };
        st.links.insert(link.id, link.clone());
        st.link_tags
            .insert(link.id, tag_ids.iter().copied().collect());
        st.link_groups
            .insert(link.id, group_ids.iter().copied().collect());
        link
    }

    pub fn link(&self, id: i64) -> Option<Link> {
        self.state.lock().unwrap().links.get(&id).cloned()
    }

    pub fn tag_ids_of(&self, link_id: i64) -> Vec<i64> {
        let st = self.state.lock().unwrap();
        st.link_tags
            .get(&link_id)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn group_ids_of(&self, link_id: i64) -> Vec<i64> {
        let st = self.state.lock().unwrap();
        st.link_groups
            .get(&link_id)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    /// Makes every later create or update fail while writing its tag and
    /// group rows.
    pub fn fail_association_writes(&self) {
        self.state.lock().unwrap().fail_association_writes = true;
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn list_filtered(&self, filter: &LinkFilter) -> anyhow::Result<Vec<Link>> {
        Ok(self.state.lock().unwrap().filtered(filter))
    }

    async fn page_filtered(
        &self,
        filter: &LinkFilter,
        page: PageRequest,
    ) -> anyhow::Result<LinkPage> {
        let all = self.state.lock().unwrap().filtered(filter);
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Ok(LinkPage { items, total })
    }

    async fn get_for_owner(&self, id: i64, owner_id: Uuid) -> anyhow::Result<Option<Link>> {
        let st = self.state.lock().unwrap();
        Ok(st.links.get(&id).filter(|l| l.owner_id == owner_id).cloned())
    }

    async fn tags_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let st = self.state.lock().unwrap();
        if !st.owns(link_id, owner_id) {
            return Ok(Vec::new());
        }
        Ok(st
            .link_tags
            .get(&link_id)
            .map(|ids| ids.iter().filter_map(|id| st.tags.get(id).cloned()).collect())
            .unwrap_or_default())
    }

    async fn groups_for_link(&self, link_id: i64, owner_id: Uuid) -> anyhow::Result<Vec<Group>> {
        let st = self.state.lock().unwrap();
        if !st.owns(link_id, owner_id) {
            return Ok(Vec::new());
        }
        Ok(st
            .link_groups
            .get(&link_id)
            .map(|ids| ids.iter().filter_map(|id| st.groups.get(id).cloned()).collect())
            .unwrap_or_default())
    }

    async fn create_for_owner(&self, owner_id: Uuid, write: &LinkWrite) -> anyhow::Result<Link> {
        let mut st = self.state.lock().unwrap();
        let at = st.tick();
        let link = Link {
            id: st.next_id(),
            owner_id,
            title: write.title.clone(),
            url: write.url.clone(),
            created_at: at,
            updated_at: at,
        };
        st.in_transaction(|tx| {
            tx.links.insert(link.id, link.clone());
            tx.write_associations(link.id, &write.tag_ids, &write.group_ids)
        })?;
        st.writes += 1;
        Ok(link)
    }

    async fn update_for_owner(
        &self,
        id: i64,
        owner_id: Uuid,
        write: &LinkWrite,
    ) -> anyhow::Result<Option<Link>> {
        let mut st = self.state.lock().unwrap();
        if !st.owns(id, owner_id) {
            return Ok(None);
        }
        let at = st.tick();
        let updated = st.in_transaction(|tx| {
            let Some(link) = tx.links.get_mut(&id) else {
                return Ok(None);
            };
            link.title = write.title.clone();
            link.url = write.url.clone();
            link.updated_at = at;
            let updated = link.clone();
            tx.write_associations(id, &write.tag_ids, &write.group_ids)?;
            Ok(Some(updated))
        })?;
        st.writes += 1;
        Ok(updated)
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if !st.owns(id, owner_id) {
            return Ok(false);
        }
        st.links.remove(&id);
        st.link_tags.remove(&id);
        st.link_groups.remove(&id);
        st.writes += 1;
        Ok(true)
    }

    async fn replace_tags(&self, id: i64, owner_id: Uuid, tag_ids: &[i64]) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if !st.owns(id, owner_id) {
            return Ok(false);
        }
        st.link_tags.insert(id, tag_ids.iter().copied().collect());
        st.writes += 1;
        Ok(true)
    }

    async fn replace_groups(
        &self,
        id: i64,
        owner_id: Uuid,
        group_ids: &[i64],
    ) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if !st.owns(id, owner_id) {
            return Ok(false);
        }
        st.link_groups
            .insert(id, group_ids.iter().copied().collect());
        st.writes += 1;
        Ok(true)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<TagUsage>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<TagUsage> = st
            .tags
            .values()
            .filter(|t| t.owner_id == owner_id)
            .map(|t| TagUsage {
                tag: t.clone(),
                count: st
                    .link_tags
                    .iter()
                    .filter(|(link_id, ids)| st.owns(**link_id, owner_id) && ids.contains(&t.id))
                    .count() as i64,
            })
            .collect();
        out.sort_by(|a, b| a.tag.name.cmp(&b.tag.name).then(a.tag.id.cmp(&b.tag.id)));
        Ok(out)
    }

    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Tag>> {
        let st = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| st.tags.get(id))
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_or_get(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        let existing = {
            let st = self.state.lock().unwrap();
            st.tags
                .values()
                .find(|t| t.owner_id == owner_id && t.name == name)
                .cloned()
        };
        Ok(match existing {
            Some(tag) => tag,
            None => self.add_tag(owner_id, name),
        })
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Group>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Group> = st
            .groups
            .values()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Group>> {
        let st = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| st.groups.get(id))
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_for_owner(&self, owner_id: Uuid, title: &str) -> anyhow::Result<Group> {
        Ok(self.add_group(owner_id, title))
    }
}

/// Title lookup answering from a fixed table and counting calls.
#[derive(Default)]
pub struct StubTitles {
    titles: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, title: &str) -> Self {
        self.titles.insert(url.to_string(), title.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TitleLookup for StubTitles {
    async fn title_for(&self, url: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.titles.get(url).cloned().unwrap_or_default()
    }
}
