use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankDetail {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: Option<String>,
    pub swift: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReliefFund {
    pub id: String,
    pub title: String,
    pub description: String,
    pub goal: f64,
    pub raised: f64,
    pub contact_email: Option<String>,
    pub bank_details: Vec<BankDetail>,
}

impl ReliefFund {
    /// 目標額に対する達成率（0〜100）
    pub fn progress_percent(&self) -> f64 {
        if self.goal <= 0.0 || !self.goal.is_finite() {
            return 0.0;
        }
        (self.raised / self.goal * 100.0).clamp(0.0, 100.0)
    }
}
