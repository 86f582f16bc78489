use uuid::Uuid;

use crate::application::ports::link_repository::LinkRepository;

pub struct DeleteLink<'a, R: LinkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LinkRepository + ?Sized> DeleteLink<'a, R> {
    // Join rows go with the link (ON DELETE CASCADE)
    pub async fn execute(&self, owner_id: Uuid, id: i64) -> anyhow::Result<bool> {
        let deleted = self.repo.delete_owned(id, owner_id).await?;
        if deleted {
            tracing::info!(owner_id = %owner_id, link_id = id, "link_deleted");
        }
        Ok(deleted)
    }
}
