pub mod community_store;

pub use community_store::{CommunitySnapshot, CommunityStore};
