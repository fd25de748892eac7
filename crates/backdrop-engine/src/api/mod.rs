pub mod backdrop;
pub mod capabilities;
pub mod config;
pub mod types;
