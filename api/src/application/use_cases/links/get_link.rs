use uuid::Uuid;

use crate::application::dto::links::LinkDetailDto;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::services::link_view;

#[derive(Debug, Clone)]
pub enum LinkLookup {
    Found(Box<LinkDetailDto>),
    /// Not owned or not existing; callers send the user back to the index.
    Redirect,
}

pub struct GetLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> GetLink<'a, R> {
    pub async fn execute(&self, owner_id: Uuid, id: i64) -> anyhow::Result<LinkLookup> {
        let link = match self.repo.get_for_owner(id, owner_id).await? {
            Some(link) => link,
            None => return Ok(LinkLookup::Redirect),
        };
        let tags = self.repo.tags_for_link(link.id, owner_id).await?;
        let groups = self.repo.groups_for_link(link.id, owner_id).await?;
        let dto = link_view::detail(link, tags, groups, chrono::Utc::now());
        Ok(LinkLookup::Found(Box::new(dto)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;

    #[tokio::test]
    async fn owner_sees_detail_with_relations() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let tag = store.add_tag(owner, "lang");
        let g = store.add_group(owner, "Reading");
        let link = store.add_link(owner, "Go Tour", "https://go.dev/tour", &[tag.id], &[g.id]);

        let uc = GetLink { repo: &store };
        let LinkLookup::Found(dto) = uc.execute(owner, link.id).await.unwrap() else {
            panic!("expected detail");
        };
        assert_eq!(dto.id, link.id);
        assert_eq!(dto.link, "https://go.dev/tour");
        assert_eq!(dto.tags.len(), 1);
        assert_eq!(dto.tags[0].name, "lang");
        assert_eq!(dto.groups, vec![g.id]);
        assert_eq!(dto.link_groups[0].title, "Reading");
    }

    #[tokio::test]
    async fn foreign_or_missing_link_redirects() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let link = store.add_link(owner, "Private", "https://private.example", &[], &[]);

        let uc = GetLink { repo: &store };
        assert!(matches!(
            uc.execute(Uuid::new_v4(), link.id).await.unwrap(),
            LinkLookup::Redirect
        ));
        assert!(matches!(
            uc.execute(owner, link.id + 100).await.unwrap(),
            LinkLookup::Redirect
        ));
    }
}
