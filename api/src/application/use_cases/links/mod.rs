pub mod create_link;
pub mod delete_link;
pub mod get_link;
pub mod list_links;
pub mod prepare;
pub mod sync_link_groups;
pub mod sync_link_tags;
pub mod update_link;
