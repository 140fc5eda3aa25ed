pub mod views;

pub use views::{DonationSummary, donation_summaries};
