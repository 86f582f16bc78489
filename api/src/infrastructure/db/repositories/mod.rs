pub mod group_repository_sqlx;
pub mod link_repository_sqlx;
pub mod tag_repository_sqlx;
