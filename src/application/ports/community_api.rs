use crate::application::ports::records::{
    CollectionRecord, CommentRecord, EventRecord, FeedRecord, MediaRecord, MemberRecord,
    ReliefFundRecord,
};
use crate::domain::value_objects::FileDescriptor;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone)]
pub struct CreateFeedRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub media: Option<FileDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub feed_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub text: String,
}

/// イベント作成・更新で共通のフォーム
#[derive(Debug, Clone)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub location: String,
    pub cover: Option<FileDescriptor>,
}

#[derive(Debug, Clone)]
pub struct CreateMediaRequest {
    pub title: String,
    pub category: String,
    pub media: Option<FileDescriptor>,
}

#[derive(Debug, Clone)]
pub struct MemberForm {
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub media: Option<FileDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub member_id: String,
    pub date: String,
    pub monthly_amount: String,
    pub bhawan_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionRequest {
    pub collection_id: String,
    pub date: String,
    pub monthly_amount: String,
    pub bhawan_amount: f64,
}

/// コミュニティ API のポート。
///
/// 作成・更新系はレスポンスの `data` を返し、欠けていれば空レコードを返す。
#[async_trait]
pub trait CommunityApi: Send + Sync {
    async fn fetch_feeds(&self) -> Result<Vec<FeedRecord>, AppError>;
    async fn create_feed(&self, request: CreateFeedRequest) -> Result<FeedRecord, AppError>;
    async fn delete_feed(&self, feed_id: &str) -> Result<(), AppError>;

    async fn fetch_comments(&self, feed_id: &str) -> Result<Vec<CommentRecord>, AppError>;
    async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> Result<Option<CommentRecord>, AppError>;
    async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError>;

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, AppError>;
    async fn create_event(&self, form: EventForm) -> Result<EventRecord, AppError>;
    async fn update_event(&self, event_id: &str, form: EventForm)
    -> Result<EventRecord, AppError>;
    async fn delete_event(&self, event_id: &str) -> Result<(), AppError>;

    async fn fetch_media(&self) -> Result<Vec<MediaRecord>, AppError>;
    async fn create_media(&self, request: CreateMediaRequest) -> Result<MediaRecord, AppError>;
    async fn delete_media(&self, media_id: &str) -> Result<(), AppError>;

    async fn fetch_members(&self) -> Result<Vec<MemberRecord>, AppError>;
    async fn create_member(&self, form: MemberForm) -> Result<MemberRecord, AppError>;
    async fn update_member(
        &self,
        member_id: &str,
        form: MemberForm,
    ) -> Result<MemberRecord, AppError>;
    async fn delete_member(&self, member_id: &str) -> Result<(), AppError>;

    async fn fetch_collections(&self) -> Result<Vec<CollectionRecord>, AppError>;
    async fn create_collection(
        &self,
        request: CreateCollectionRequest,
    ) -> Result<CollectionRecord, AppError>;
    async fn update_collection(
        &self,
        request: UpdateCollectionRequest,
    ) -> Result<CollectionRecord, AppError>;
    async fn delete_collection(&self, collection_id: &str) -> Result<(), AppError>;

    /// 救済基金のルートはバックエンドに存在しないため、実装側は
    /// `AppError::NotImplemented` を返してよい
    async fn fetch_relief_funds(&self) -> Result<Vec<ReliefFundRecord>, AppError>;
}
