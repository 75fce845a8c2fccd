pub mod identity;
pub mod poll;
