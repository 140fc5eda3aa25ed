pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;

pub use application::ports::community_api::CommunityApi;
pub use application::services::community_store::{
    CommunitySnapshot, CommunityStore, DonationInput, DonationUpdate, EventInput, MemberInput,
    NewComment, NewMedia, NewPost,
};
pub use infrastructure::http::HttpCommunityApi;
pub use shared::{AppConfig, AppError, Result};
