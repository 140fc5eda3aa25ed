pub mod donation;
pub mod event;
pub mod media;
pub mod member;
pub mod post;
pub mod relief_fund;

pub use donation::DonationRecord;
pub use event::CommunityEvent;
pub use media::MediaItem;
pub use member::Member;
pub use post::{Comment, Post};
pub use relief_fund::{BankDetail, ReliefFund};
