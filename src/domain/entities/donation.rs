use serde::{Deserialize, Serialize};

/// サーバー側の呼び名は collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationRecord {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub month: String,
    pub monthly_status: String,
    pub amount: f64,
    // NOTE: サーバーに記録者の情報がないため monthly_status と同じ値が入る
    pub noted_by: String,
}

impl DonationRecord {
    pub fn belongs_to(&self, member_id: &str) -> bool {
        self.member_id == member_id
    }
}
