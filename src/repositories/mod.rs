pub mod account_directory;
pub mod poll_registry;
