use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Pending,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Pending => "pending",
            MemberStatus::Inactive => "inactive",
        }
    }

    /// 自由記述のロール文字列から部分一致で推定する。検証はしない
    pub fn from_role_text(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return MemberStatus::Active;
        };
        let lowered = text.to_lowercase();
        if lowered.contains("pending") {
            MemberStatus::Pending
        } else if lowered.contains("inactive") {
            MemberStatus::Inactive
        } else {
            MemberStatus::Active
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
