use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// クライアント側だけで切り替える閲覧ロール。サーバー側の権限ではない
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Admin,
    Member,
    #[default]
    Guest,
}

impl ViewerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerRole::Admin => "admin",
            ViewerRole::Member => "member",
            ViewerRole::Guest => "guest",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, ViewerRole::Admin)
    }

    /// 投稿・イベント・メディアの作成
    pub fn can_publish(&self) -> bool {
        self.is_admin()
    }

    /// メンバー・寄付・救済基金の管理
    pub fn can_manage(&self) -> bool {
        self.is_admin()
    }

    pub fn can_view_membership(&self) -> bool {
        matches!(self, ViewerRole::Admin | ViewerRole::Member)
    }

    pub fn can_view_donations(&self) -> bool {
        matches!(self, ViewerRole::Admin | ViewerRole::Member)
    }

    /// コメント投稿時の著者ラベル
    pub fn author_label(&self) -> &'static str {
        match self {
            ViewerRole::Admin => "Admin",
            ViewerRole::Member => "Member",
            ViewerRole::Guest => "Community Guest",
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ViewerRole::Admin),
            "member" => Ok(ViewerRole::Member),
            "guest" => Ok(ViewerRole::Guest),
            other => Err(format!("unknown viewer role: {other}")),
        }
    }
}
