use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::groups::group::Group;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list_for_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Group>>;
    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Group>>;
    async fn create_for_owner(&self, owner_id: Uuid, title: &str) -> anyhow::Result<Group>;
}
