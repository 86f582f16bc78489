pub mod groups;
pub mod links;
pub mod tags;
