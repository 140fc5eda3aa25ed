pub mod community_api;
pub mod records;
