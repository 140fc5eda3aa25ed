pub(crate) mod community_api;

pub(crate) use community_api::{CallGate, TestCommunityApi};
