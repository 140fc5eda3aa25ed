use crate::domain::entities::{DonationRecord, Member};
use serde::Serialize;
use std::collections::HashMap;

pub const UNKNOWN_MEMBER_NAME: &str = "Unknown member";

/// 寄付記録 1 件分の集計行
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DonationSummary {
    pub donation_id: String,
    pub member_id: String,
    pub member_name: String,
    pub month: String,
    pub status: String,
    pub target: f64,
    pub paid: f64,
    pub unpaid: f64,
    pub extra: f64,
}

/// 各記録をメンバーの月額目標と突き合わせる。
///
/// 未払い額は `max(目標 - 支払額, 0)`、超過分は目標を上回った分。
/// ローカルにメンバーがいなければ目標は 0 として扱う。
pub fn donation_summaries(donations: &[DonationRecord], members: &[Member]) -> Vec<DonationSummary> {
    let by_id: HashMap<&str, &Member> = members
        .iter()
        .map(|member| (member.id.as_str(), member))
        .collect();

    donations
        .iter()
        .map(|donation| {
            let member = by_id.get(donation.member_id.as_str());
            let target = member.map_or(0.0, |member| member.monthly_contribution);
            let paid = donation.amount;
            DonationSummary {
                donation_id: donation.id.clone(),
                member_id: donation.member_id.clone(),
                member_name: member.map_or_else(
                    || UNKNOWN_MEMBER_NAME.to_string(),
                    |member| member.name.clone(),
                ),
                month: donation.month.clone(),
                status: donation.monthly_status.clone(),
                target,
                paid,
                unpaid: (target - paid).max(0.0),
                extra: (paid - target).max(0.0),
            }
        })
        .collect()
}
