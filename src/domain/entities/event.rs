use serde::{Deserialize, Serialize};

/// コミュニティイベント。開始日時はサーバーから受け取った ISO 文字列のまま保持する
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub location: String,
    pub cover_image: Option<String>,
}
