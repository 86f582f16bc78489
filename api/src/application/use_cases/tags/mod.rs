pub mod create_tag;
pub mod list_tags;
