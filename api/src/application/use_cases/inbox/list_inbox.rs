use uuid::Uuid;

use crate::application::dto::links::InboxDto;
use crate::application::ports::link_repository::LinkRepository;
use crate::application::services::link_view::{self, UrlDisplay};
use crate::domain::links::filter::LinkFilter;

#[derive(Debug, Clone, Default)]
pub struct InboxQuery {
    pub search: Option<String>,
    /// None means true
    pub untagged: Option<bool>,
    /// None means true
    pub ungrouped: Option<bool>,
}

pub struct ListInbox<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> ListInbox<'a, R> {
    pub async fn execute(&self, owner_id: Uuid, query: &InboxQuery) -> anyhow::Result<InboxDto> {
        let filter = LinkFilter::for_inbox(
            owner_id,
            query.search.as_deref(),
            query.untagged,
            query.ungrouped,
        );
        let links = self
            .repo
            .list_filtered(&filter)
            .await?
            .into_iter()
            .map(|l| link_view::list_item(l, UrlDisplay::Full))
            .collect();
        Ok(InboxDto {
            links,
            search: query.search.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;

    #[tokio::test]
    async fn defaults_show_links_without_tags_and_groups() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let lang = store.add_tag(owner, "lang");
        let a = store.add_link(owner, "Rust Book", "https://rust-lang.org", &[], &[]);
        store.add_link(owner, "Go Tour", "https://go.dev", &[lang.id], &[]);

        let uc = ListInbox { repo: &store };
        let out = uc.execute(owner, &InboxQuery::default()).await.unwrap();

        assert_eq!(out.links.len(), 1);
        assert_eq!(out.links[0].id, a.id);
        assert_eq!(out.links[0].link, "https://rust-lang.org");
        assert_eq!(out.search, "");
    }

    #[tokio::test]
    async fn grouped_but_untagged_link_only_shows_when_groups_ignored() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let g = store.add_group(owner, "Reading");
        let grouped = store.add_link(owner, "Grouped", "https://grouped.example", &[], &[g.id]);
        let bare = store.add_link(owner, "Bare", "https://bare.example", &[], &[]);
        let uc = ListInbox { repo: &store };

        let out = uc.execute(owner, &InboxQuery::default()).await.unwrap();
        assert_eq!(out.links.iter().map(|l| l.id).collect::<Vec<_>>(), vec![bare.id]);

        let out = uc
            .execute(
                owner,
                &InboxQuery {
                    ungrouped: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            out.links.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![bare.id, grouped.id]
        );
    }

    #[tokio::test]
    async fn never_leaks_other_users_links() {
        let store = InMemoryStore::new();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.add_link(other, "Secret", "https://secret.example", &[], &[]);
        let uc = ListInbox { repo: &store };

        let out = uc
            .execute(
                me,
                &InboxQuery {
                    search: Some("secret".into()),
                    untagged: Some(false),
                    ungrouped: Some(false),
                },
            )
            .await
            .unwrap();
        assert!(out.links.is_empty());
        assert_eq!(out.search, "secret");
    }
}
