use uuid::Uuid;

use crate::application::dto::tags::TagItemDto;
use crate::application::ports::tag_repository::TagRepository;

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self, owner_id: Uuid) -> anyhow::Result<Vec<TagItemDto>> {
        let rows = self.repo.list_with_counts(owner_id).await?;
        Ok(rows
            .into_iter()
            .map(|u| TagItemDto {
                id: u.tag.id,
                name: u.tag.name,
                count: u.count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;

    #[tokio::test]
    async fn counts_only_the_owners_links_and_keeps_unused_tags() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let rust = store.add_tag(owner, "rust");
        let unused = store.add_tag(owner, "archive");
        store.add_tag(Uuid::new_v4(), "rust");
        store.add_link(owner, "Book", "https://doc.rust-lang.org/book/", &[rust.id], &[]);
        store.add_link(owner, "Docs", "https://docs.rs", &[rust.id], &[]);

        let uc = ListTags { repo: &store };
        let items = uc.execute(owner).await.unwrap();

        assert_eq!(
            items,
            vec![
                TagItemDto { id: unused.id, name: "archive".into(), count: 0 },
                TagItemDto { id: rust.id, name: "rust".into(), count: 2 },
            ]
        );
    }
}
