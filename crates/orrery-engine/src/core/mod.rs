pub mod body;
pub mod registry;
pub mod time;
