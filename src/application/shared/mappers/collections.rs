use super::id_or_generate;
use crate::application::ports::records::CollectionRecord;
use crate::domain::entities::DonationRecord;

pub const UNKNOWN_MEMBER_ID: &str = "unknown";
pub const DEFAULT_MEMBER_NAME: &str = "Member";
pub const PENDING_STATUS: &str = "Pending";

pub fn map_collection(collection: &CollectionRecord) -> DonationRecord {
    let status = collection.status_label().unwrap_or(PENDING_STATUS).to_string();

    DonationRecord {
        id: id_or_generate(collection.record_id()),
        member_id: collection
            .member_id()
            .unwrap_or(UNKNOWN_MEMBER_ID)
            .to_string(),
        member_name: collection
            .member_name()
            .unwrap_or(DEFAULT_MEMBER_NAME)
            .to_string(),
        month: collection.date.clone().unwrap_or_default(),
        monthly_status: status.clone(),
        amount: collection.amount().unwrap_or(0.0),
        noted_by: status,
    }
}
