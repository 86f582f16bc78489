use uuid::Uuid;

use crate::application::dto::tags::TagRefDto;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::validation::{self, CommandError, TAG_NAME_MAX_CHARS};

pub struct CreateTag<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> CreateTag<'a, R> {
    // Existing names are returned as-is
    pub async fn execute(&self, owner_id: Uuid, name: &str) -> Result<TagRefDto, CommandError> {
        let name = validation::validate_name("name", name, TAG_NAME_MAX_CHARS)?;
        let tag = self
            .repo
            .create_or_get(owner_id, &name)
            .await
            .map_err(CommandError::Storage)?;
        Ok(TagRefDto {
            id: tag.id,
            name: tag.name,
        })
    }
}
