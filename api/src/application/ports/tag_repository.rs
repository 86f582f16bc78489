use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::tags::tag::{Tag, TagUsage};

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<TagUsage>>;

    /// Tags among `ids` that exist and belong to `owner_id`. Others are absent.
    async fn find_owned(&self, owner_id: Uuid, ids: &[i64]) -> anyhow::Result<Vec<Tag>>;

    async fn create_or_get(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag>;
}
