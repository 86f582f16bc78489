pub mod auth;
pub mod error;
pub mod groups;
pub mod health;
pub mod inbox;
pub mod links;
pub mod query;
pub mod tags;
