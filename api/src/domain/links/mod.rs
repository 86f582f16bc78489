pub mod filter;
pub mod link;
pub mod timestamps;
