pub mod associations;
pub mod link_view;
