//! 画面やターミナルに出す前の表示用データ。

mod donations;
mod listing;

pub use donations::{DonationSummary, UNKNOWN_MEMBER_NAME, donation_summaries};
pub use listing::{
    render_donations, render_events, render_media, render_members, render_posts,
    render_relief_funds,
};
