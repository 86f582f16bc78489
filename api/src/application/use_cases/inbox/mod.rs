pub mod list_inbox;
