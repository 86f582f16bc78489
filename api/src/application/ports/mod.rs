pub mod group_repository;
pub mod link_repository;
pub mod tag_repository;
pub mod title_lookup;
