use uuid::Uuid;

use crate::application::dto::groups::GroupItemDto;
use crate::application::ports::group_repository::GroupRepository;
use crate::application::validation::{self, CommandError, TITLE_MAX_CHARS};

pub struct CreateGroup<'a, R: GroupRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GroupRepository + ?Sized> CreateGroup<'a, R> {
    pub async fn execute(&self, owner_id: Uuid, title: &str) -> Result<GroupItemDto, CommandError> {
        let title = validation::validate_name("title", title, TITLE_MAX_CHARS)?;
        let group = self
            .repo
            .create_for_owner(owner_id, &title)
            .await
            .map_err(CommandError::Storage)?;
        tracing::info!(owner_id = %owner_id, group_id = group.id, "group_created");
        Ok(GroupItemDto {
            id: group.id,
            title: group.title,
        })
    }
}
