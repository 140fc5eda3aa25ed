use super::client::{ApiClient, RequestBody};
use super::multipart::FormBuilder;
use crate::application::ports::community_api::{
    CommunityApi, CreateCollectionRequest, CreateCommentRequest, CreateFeedRequest,
    CreateMediaRequest, EventForm, MemberForm, UpdateCollectionRequest,
};
use crate::application::ports::records::{
    CollectionRecord, CommentRecord, EventRecord, FeedRecord, MediaRecord, MemberRecord,
    ReliefFundRecord,
};
use crate::shared::config::ApiConfig;
use crate::shared::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// REST バックエンドに対する `CommunityApi` 実装
#[derive(Clone)]
pub struct HttpCommunityApi {
    client: ApiClient,
}

impl HttpCommunityApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
        })
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.client.get::<Vec<T>>(path).await?.data.unwrap_or_default())
    }

    async fn single<T: DeserializeOwned + Default>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T> {
        Ok(self
            .client
            .request::<T>(method, path, body)
            .await?
            .data
            .unwrap_or_default())
    }

    fn json_body<T: Serialize>(payload: &T) -> Result<RequestBody> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(|err| AppError::Serialization(err.to_string()))
    }

    async fn event_form(form: &EventForm) -> Result<RequestBody> {
        let form = FormBuilder::new()
            .text("title", form.title.as_str())
            .text("description", form.description.as_str())
            .text("date", form.starts_at.as_str())
            .text("location", form.location.as_str())
            .file("cover", form.cover.as_ref())
            .await?
            .build();
        Ok(RequestBody::Multipart(form))
    }

    async fn member_form(form: &MemberForm) -> Result<RequestBody> {
        let form = FormBuilder::new()
            .text("userName", form.user_name.as_str())
            .text("email", form.email.as_str())
            .text("role", form.role.as_str())
            .optional_text("phoneNumber", form.phone_number.as_deref())
            .file("media", form.media.as_ref())
            .await?
            .build();
        Ok(RequestBody::Multipart(form))
    }
}

#[async_trait]
impl CommunityApi for HttpCommunityApi {
    async fn fetch_feeds(&self) -> Result<Vec<FeedRecord>> {
        self.list("/feeds").await
    }

    async fn create_feed(&self, request: CreateFeedRequest) -> Result<FeedRecord> {
        let form = FormBuilder::new()
            .text("title", request.title)
            .text("description", request.description)
            .text("category", request.category)
            .file("media", request.media.as_ref())
            .await?
            .build();
        self.single(Method::POST, "/feeds", RequestBody::Multipart(form))
            .await
    }

    async fn delete_feed(&self, feed_id: &str) -> Result<()> {
        self.client.delete(&format!("/feeds/{feed_id}")).await
    }

    async fn fetch_comments(&self, feed_id: &str) -> Result<Vec<CommentRecord>> {
        self.list(&format!("/comments/{feed_id}")).await
    }

    async fn create_comment(&self, request: CreateCommentRequest) -> Result<Option<CommentRecord>> {
        let body = Self::json_body(&request)?;
        Ok(self
            .client
            .request::<CommentRecord>(Method::POST, "/comments", body)
            .await?
            .data)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.client.delete(&format!("/comments/{comment_id}")).await
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        self.list("/events").await
    }

    async fn create_event(&self, form: EventForm) -> Result<EventRecord> {
        let body = Self::event_form(&form).await?;
        self.single(Method::POST, "/events", body).await
    }

    async fn update_event(&self, event_id: &str, form: EventForm) -> Result<EventRecord> {
        let body = Self::event_form(&form).await?;
        self.single(Method::PUT, &format!("/events/{event_id}"), body)
            .await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.client.delete(&format!("/events/{event_id}")).await
    }

    async fn fetch_media(&self) -> Result<Vec<MediaRecord>> {
        self.list("/getMedia/").await
    }

    async fn create_media(&self, request: CreateMediaRequest) -> Result<MediaRecord> {
        let form = FormBuilder::new()
            .text("title", request.title)
            .text("category", request.category)
            .file("media", request.media.as_ref())
            .await?
            .build();
        self.single(Method::POST, "/createMedia", RequestBody::Multipart(form))
            .await
    }

    async fn delete_media(&self, media_id: &str) -> Result<()> {
        self.client.delete(&format!("/deleteMedia/{media_id}")).await
    }

    async fn fetch_members(&self) -> Result<Vec<MemberRecord>> {
        self.list("/members/").await
    }

    async fn create_member(&self, form: MemberForm) -> Result<MemberRecord> {
        let body = Self::member_form(&form).await?;
        self.single(Method::POST, "/members", body).await
    }

    async fn update_member(&self, member_id: &str, form: MemberForm) -> Result<MemberRecord> {
        let body = Self::member_form(&form).await?;
        self.single(Method::PUT, &format!("/members/{member_id}"), body)
            .await
    }

    async fn delete_member(&self, member_id: &str) -> Result<()> {
        self.client.delete(&format!("/members/{member_id}")).await
    }

    async fn fetch_collections(&self) -> Result<Vec<CollectionRecord>> {
        self.list("/collections/").await
    }

    async fn create_collection(&self, request: CreateCollectionRequest) -> Result<CollectionRecord> {
        let body = Self::json_body(&request)?;
        self.single(Method::POST, "/collections", body).await
    }

    async fn update_collection(&self, request: UpdateCollectionRequest) -> Result<CollectionRecord> {
        let body = Self::json_body(&request)?;
        self.single(Method::PUT, "/collections", body).await
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/collections/{collection_id}"))
            .await
    }

    async fn fetch_relief_funds(&self) -> Result<Vec<ReliefFundRecord>> {
        Err(AppError::NotImplemented(
            "relief funds have no backend route".to_string(),
        ))
    }
}
