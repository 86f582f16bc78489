pub mod create_group;
pub mod list_groups;
