use uuid::Uuid;

use crate::application::dto::groups::GroupItemDto;
use crate::application::ports::group_repository::GroupRepository;

pub struct ListGroups<'a, R: GroupRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GroupRepository + ?Sized> ListGroups<'a, R> {
    pub async fn execute(&self, owner_id: Uuid) -> anyhow::Result<Vec<GroupItemDto>> {
        let rows = self.repo.list_for_owner(owner_id).await?;
        Ok(rows
            .into_iter()
            .map(|g| GroupItemDto {
                id: g.id,
                title: g.title,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;

    #[tokio::test]
    async fn lists_own_groups_by_title() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let work = store.add_group(owner, "Work");
        let reading = store.add_group(owner, "Reading");
        store.add_group(Uuid::new_v4(), "Elsewhere");

        let uc = ListGroups { repo: &store };
        let items = uc.execute(owner).await.unwrap();

        let titles: Vec<(i64, &str)> = items.iter().map(|g| (g.id, g.title.as_str())).collect();
        assert_eq!(titles, vec![(reading.id, "Reading"), (work.id, "Work")]);
    }
}
