pub mod config;
pub mod dom;
pub mod field_visibility;
