pub mod entities;
pub mod value_objects;

pub use entities::{
    BankDetail, Comment, CommunityEvent, DonationRecord, MediaItem, Member, Post, ReliefFund,
};
pub use value_objects::{FileDescriptor, MediaKind, MemberStatus, ViewerRole};
