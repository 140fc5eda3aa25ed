use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{Notify, RwLock};

use crate::application::ports::community_api::{
    CommunityApi, CreateCollectionRequest, CreateCommentRequest, CreateFeedRequest,
    CreateMediaRequest, EventForm, MemberForm, UpdateCollectionRequest,
};
use crate::application::ports::records::{
    CollectionRecord, CommentRecord, EventRecord, FeedRecord, MediaRecord, MemberRecord,
    ReliefFundRecord,
};
use crate::shared::error::AppError;

/// 1 回だけ呼び出しを止めるゲート。`entered` で到達を知らせ、`release` まで待つ
#[derive(Clone, Default)]
pub struct CallGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
struct FakeState {
    feeds: Vec<FeedRecord>,
    comments: HashMap<String, Vec<CommentRecord>>,
    events: Vec<EventRecord>,
    media: Vec<MediaRecord>,
    members: Vec<MemberRecord>,
    collections: Vec<CollectionRecord>,
    relief_funds: Option<Vec<ReliefFundRecord>>,
    failing_comment_feeds: HashSet<String>,
    failing_ops: HashSet<&'static str>,
    calls: Vec<String>,
    next_id: usize,
    created_comment: Option<CommentRecord>,
    created_media: Vec<CreateMediaRequest>,
    member_forms: Vec<MemberForm>,
    collection_requests: Vec<Value>,
    gates: HashMap<&'static str, CallGate>,
    empty_member_responses: bool,
}

/// メモリ上で動く `CommunityApi` のフェイク
pub struct TestCommunityApi {
    state: RwLock<FakeState>,
}

impl TestCommunityApi {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FakeState::default()),
        }
    }

    pub fn with_feeds(mut self, feeds: Vec<FeedRecord>) -> Self {
        self.state.get_mut().feeds = feeds;
        self
    }

    pub fn with_comments(mut self, feed_id: &str, comments: Vec<CommentRecord>) -> Self {
        self.state
            .get_mut()
            .comments
            .insert(feed_id.to_string(), comments);
        self
    }

    pub fn with_events(mut self, events: Vec<EventRecord>) -> Self {
        self.state.get_mut().events = events;
        self
    }

    pub fn with_media(mut self, media: Vec<MediaRecord>) -> Self {
        self.state.get_mut().media = media;
        self
    }

    pub fn with_members(mut self, members: Vec<MemberRecord>) -> Self {
        self.state.get_mut().members = members;
        self
    }

    pub fn with_collections(mut self, collections: Vec<CollectionRecord>) -> Self {
        self.state.get_mut().collections = collections;
        self
    }

    pub fn with_relief_funds(mut self, funds: Vec<ReliefFundRecord>) -> Self {
        self.state.get_mut().relief_funds = Some(funds);
        self
    }

    /// 指定した投稿のコメント取得だけを失敗させる
    pub fn fail_comments_for(mut self, feed_id: &str) -> Self {
        self.state
            .get_mut()
            .failing_comment_feeds
            .insert(feed_id.to_string());
        self
    }

    /// 操作名 (`"fetch_events"` など) を指定して HTTP 500 を返させる
    pub fn fail_on(mut self, op: &'static str) -> Self {
        self.state.get_mut().failing_ops.insert(op);
        self
    }

    /// `create_comment` が返すレコードを差し替える
    pub fn with_created_comment(mut self, record: CommentRecord) -> Self {
        self.state.get_mut().created_comment = Some(record);
        self
    }

    /// 指定した操作の最初の呼び出しを `gate` が開くまで止める
    pub fn gate_on(mut self, op: &'static str, gate: CallGate) -> Self {
        self.state.get_mut().gates.insert(op, gate);
        self
    }

    /// メンバー作成・更新のレスポンスを `data` なしの空レコードにする
    pub fn with_empty_member_responses(mut self) -> Self {
        self.state.get_mut().empty_member_responses = true;
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }

    pub async fn created_media(&self) -> Vec<CreateMediaRequest> {
        self.state.read().await.created_media.clone()
    }

    pub async fn member_forms(&self) -> Vec<MemberForm> {
        self.state.read().await.member_forms.clone()
    }

    pub async fn collection_requests(&self) -> Vec<Value> {
        self.state.read().await.collection_requests.clone()
    }

    async fn record_call(&self, op: &'static str, detail: &str) -> Result<(), AppError> {
        let (gate, failing) = {
            let mut state = self.state.write().await;
            if detail.is_empty() {
                state.calls.push(op.to_string());
            } else {
                state.calls.push(format!("{op}:{detail}"));
            }
            (state.gates.remove(op), state.failing_ops.contains(op))
        };
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if failing {
            return Err(AppError::Http {
                status: 500,
                message: format!("{op} failed"),
            });
        }
        Ok(())
    }

    async fn next_id(&self, prefix: &str) -> String {
        let mut state = self.state.write().await;
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }
}

impl Default for TestCommunityApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommunityApi for TestCommunityApi {
    async fn fetch_feeds(&self) -> Result<Vec<FeedRecord>, AppError> {
        self.record_call("fetch_feeds", "").await?;
        Ok(self.state.read().await.feeds.clone())
    }

    async fn create_feed(&self, request: CreateFeedRequest) -> Result<FeedRecord, AppError> {
        self.record_call("create_feed", &request.title).await?;
        let id = self.next_id("feed").await;
        Ok(FeedRecord {
            mongo_id: Some(id),
            title: Some(request.title),
            description: Some(request.description),
            category: Some(request.category),
            media: request.media.map(|file| file.uri),
            ..Default::default()
        })
    }

    async fn delete_feed(&self, feed_id: &str) -> Result<(), AppError> {
        self.record_call("delete_feed", feed_id).await
    }

    async fn fetch_comments(&self, feed_id: &str) -> Result<Vec<CommentRecord>, AppError> {
        self.record_call("fetch_comments", feed_id).await?;
        let state = self.state.read().await;
        if state.failing_comment_feeds.contains(feed_id) {
            return Err(AppError::Http {
                status: 500,
                message: format!("comments for {feed_id} unavailable"),
            });
        }
        Ok(state.comments.get(feed_id).cloned().unwrap_or_default())
    }

    async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> Result<Option<CommentRecord>, AppError> {
        self.record_call("create_comment", &request.feed_id).await?;
        // 既定ではサーバーが本文も ID も返さないケースを再現する
        Ok(self.state.read().await.created_comment.clone())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        self.record_call("delete_comment", comment_id).await
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, AppError> {
        self.record_call("fetch_events", "").await?;
        Ok(self.state.read().await.events.clone())
    }

    async fn create_event(&self, form: EventForm) -> Result<EventRecord, AppError> {
        self.record_call("create_event", &form.title).await?;
        let id = self.next_id("event").await;
        Ok(EventRecord {
            mongo_id: Some(id),
            title: Some(form.title),
            description: Some(form.description),
            date: Some(form.starts_at),
            location: Some(form.location),
            cover: form.cover.map(|file| file.uri),
            ..Default::default()
        })
    }

    async fn update_event(&self, event_id: &str, form: EventForm) -> Result<EventRecord, AppError> {
        self.record_call("update_event", event_id).await?;
        Ok(EventRecord {
            mongo_id: Some(event_id.to_string()),
            title: Some(form.title),
            description: Some(form.description),
            date: Some(form.starts_at),
            location: Some(form.location),
            ..Default::default()
        })
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), AppError> {
        self.record_call("delete_event", event_id).await
    }

    async fn fetch_media(&self) -> Result<Vec<MediaRecord>, AppError> {
        self.record_call("fetch_media", "").await?;
        Ok(self.state.read().await.media.clone())
    }

    async fn create_media(&self, request: CreateMediaRequest) -> Result<MediaRecord, AppError> {
        self.record_call("create_media", &request.title).await?;
        let id = self.next_id("media").await;
        let url = request
            .media
            .as_ref()
            .map(|file| format!("https://cdn.example.com/{}", file.file_name()));
        self.state.write().await.created_media.push(request);
        Ok(MediaRecord {
            mongo_id: Some(id),
            title: Some("server title".to_string()),
            media: url,
            ..Default::default()
        })
    }

    async fn delete_media(&self, media_id: &str) -> Result<(), AppError> {
        self.record_call("delete_media", media_id).await
    }

    async fn fetch_members(&self) -> Result<Vec<MemberRecord>, AppError> {
        self.record_call("fetch_members", "").await?;
        Ok(self.state.read().await.members.clone())
    }

    async fn create_member(&self, form: MemberForm) -> Result<MemberRecord, AppError> {
        self.record_call("create_member", &form.user_name).await?;
        let id = self.next_id("member").await;
        let mut state = self.state.write().await;
        if state.empty_member_responses {
            state.member_forms.push(form);
            return Ok(MemberRecord::default());
        }
        drop(state);
        let record = MemberRecord {
            mongo_id: Some(id),
            user_name: Some(form.user_name.clone()),
            email: Some(form.email.clone()),
            role: Some(form.role.clone()),
            phone_number: form.phone_number.clone(),
            ..Default::default()
        };
        self.state.write().await.member_forms.push(form);
        Ok(record)
    }

    async fn update_member(
        &self,
        member_id: &str,
        form: MemberForm,
    ) -> Result<MemberRecord, AppError> {
        self.record_call("update_member", member_id).await?;
        let mut state = self.state.write().await;
        if state.empty_member_responses {
            state.member_forms.push(form);
            return Ok(MemberRecord::default());
        }
        drop(state);
        let record = MemberRecord {
            mongo_id: Some(member_id.to_string()),
            user_name: Some(form.user_name.clone()),
            email: Some(form.email.clone()),
            role: Some(form.role.clone()),
            ..Default::default()
        };
        self.state.write().await.member_forms.push(form);
        Ok(record)
    }

    async fn delete_member(&self, member_id: &str) -> Result<(), AppError> {
        self.record_call("delete_member", member_id).await
    }

    async fn fetch_collections(&self) -> Result<Vec<CollectionRecord>, AppError> {
        self.record_call("fetch_collections", "").await?;
        Ok(self.state.read().await.collections.clone())
    }

    async fn create_collection(
        &self,
        request: CreateCollectionRequest,
    ) -> Result<CollectionRecord, AppError> {
        self.record_call("create_collection", &request.member_id)
            .await?;
        let id = self.next_id("collection").await;
        self.state
            .write()
            .await
            .collection_requests
            .push(json!(request));
        // メンバーを populate しないレスポンス
        Ok(CollectionRecord {
            mongo_id: Some(id),
            date: Some(request.date),
            monthly_amount: Some(Value::String(request.monthly_amount)),
            bhawan_amount: Some(json!(request.bhawan_amount)),
            ..Default::default()
        })
    }

    async fn update_collection(
        &self,
        request: UpdateCollectionRequest,
    ) -> Result<CollectionRecord, AppError> {
        self.record_call("update_collection", &request.collection_id)
            .await?;
        self.state
            .write()
            .await
            .collection_requests
            .push(json!(request));
        Ok(CollectionRecord {
            mongo_id: Some(request.collection_id),
            date: Some(request.date),
            monthly_amount: Some(Value::String(request.monthly_amount)),
            bhawan_amount: Some(json!(request.bhawan_amount)),
            ..Default::default()
        })
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<(), AppError> {
        self.record_call("delete_collection", collection_id).await
    }

    async fn fetch_relief_funds(&self) -> Result<Vec<ReliefFundRecord>, AppError> {
        self.record_call("fetch_relief_funds", "").await?;
        self.state
            .read()
            .await
            .relief_funds
            .clone()
            .ok_or_else(|| AppError::NotImplemented("relief funds".to_string()))
    }
}
