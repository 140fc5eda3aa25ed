mod store;
mod inputs;

pub use store::{CommunitySnapshot, CommunityStore};
pub use inputs::{
    DonationInput, DonationUpdate, EventInput, MemberInput, NewComment, NewMedia, NewPost,
};
