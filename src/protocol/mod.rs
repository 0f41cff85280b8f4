pub mod command;
pub mod sender;
