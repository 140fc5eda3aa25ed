pub mod client;
pub mod community_api;
pub mod multipart;

pub use client::{ApiClient, ApiEnvelope, RequestBody, ResponseBody};
pub use community_api::HttpCommunityApi;
pub use multipart::FormBuilder;
