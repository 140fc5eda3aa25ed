use crate::domain::value_objects::MemberStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// 表示専用。サーバーからは返らない
    pub monthly_contribution: f64,
    pub status: MemberStatus,
    pub avatar: Option<String>,
    pub role_label: Option<String>,
}
