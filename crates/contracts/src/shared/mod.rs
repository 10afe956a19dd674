pub mod dom_contract;
pub mod field_visibility;
pub mod tabs;
