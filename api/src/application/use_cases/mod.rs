pub mod groups;
pub mod inbox;
pub mod links;
pub mod tags;
