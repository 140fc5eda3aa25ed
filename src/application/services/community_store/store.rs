use super::inputs::{
    DonationInput, DonationUpdate, EventInput, MemberInput, NewComment, NewMedia, NewPost,
};
use crate::application::ports::community_api::{
    CommunityApi, CreateCollectionRequest, CreateCommentRequest, CreateFeedRequest,
    CreateMediaRequest, DEFAULT_CATEGORY, EventForm, MemberForm, UpdateCollectionRequest,
};
use crate::application::shared::mappers::collections::UNKNOWN_MEMBER_ID;
use crate::application::shared::mappers::{
    map_collection, map_comment, map_event, map_feed_to_post, map_media, map_member,
    map_relief_fund,
};
use crate::domain::entities::{
    Comment, CommunityEvent, DonationRecord, MediaItem, Member, Post, ReliefFund,
};
use crate::domain::value_objects::{ViewerRole, is_local_id};
use crate::shared::error::{AppError, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

/// ストアが保持する全コレクション
#[derive(Debug, Clone, Default)]
pub struct CommunitySnapshot {
    pub role: ViewerRole,
    pub posts: Vec<Post>,
    pub events: Vec<CommunityEvent>,
    pub media: Vec<MediaItem>,
    pub members: Vec<Member>,
    pub donations: Vec<DonationRecord>,
    pub relief_funds: Vec<ReliefFund>,
}

/// 実行中の refresh の数を数える。どの経路でも drop で確実に減らす
struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 同じ ID があれば置き換え、なければ先頭に追加する
fn replace_or_prepend<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item,
        None => items.insert(0, item),
    }
}

/// アプリケーション全体のデータストア。
///
/// 変更系の操作はまず API を呼び、返ってきた 1 件だけをローカルの
/// コレクションに反映する。一覧の再取得は `refresh` でのみ行う。
pub struct CommunityStore {
    api: Arc<dyn CommunityApi>,
    state: RwLock<CommunitySnapshot>,
    loading: AtomicUsize,
    revision: watch::Sender<u64>,
}

impl CommunityStore {
    pub fn new(api: Arc<dyn CommunityApi>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            api,
            state: RwLock::new(CommunitySnapshot::default()),
            loading: AtomicUsize::new(0),
            revision,
        }
    }

    /// 状態が変わるたびに増えるリビジョン番号を購読する
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// refresh が 1 つでも実行中なら true
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    pub async fn role(&self) -> ViewerRole {
        self.state.read().await.role
    }

    pub async fn set_role(&self, role: ViewerRole) {
        self.state.write().await.role = role;
        debug!(%role, "viewer role changed");
        self.bump();
    }

    /// 閲覧ロールが操作を許可されているか確認する
    async fn ensure_role(&self, allowed: fn(&ViewerRole) -> bool, action: &str) -> Result<()> {
        let role = self.role().await;
        if allowed(&role) {
            return Ok(());
        }
        warn!(%role, action, "operation not permitted for viewer role");
        Err(AppError::PermissionDenied(format!("{role} cannot {action}")))
    }

    pub async fn snapshot(&self) -> CommunitySnapshot {
        self.state.read().await.clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn events(&self) -> Vec<CommunityEvent> {
        self.state.read().await.events.clone()
    }

    pub async fn media(&self) -> Vec<MediaItem> {
        self.state.read().await.media.clone()
    }

    pub async fn members(&self) -> Vec<Member> {
        self.state.read().await.members.clone()
    }

    pub async fn donations(&self) -> Vec<DonationRecord> {
        self.state.read().await.donations.clone()
    }

    pub async fn relief_funds(&self) -> Vec<ReliefFund> {
        self.state.read().await.relief_funds.clone()
    }

    // ---- 読み込み ----

    /// すべてのコレクションを並行して読み直す。
    ///
    /// 個々の投稿のコメント取得失敗は空リストで代替する。トップレベルの
    /// 読み込みが失敗した場合は最初のエラーを返すが、成功した分の
    /// コレクションは置き換えられたままになる。
    pub async fn refresh(&self) -> Result<()> {
        let _loading = LoadingGuard::start(&self.loading);
        self.bump();

        let (feeds, events, media, members, collections, relief_funds) = tokio::join!(
            self.load_feeds(),
            self.load_events(),
            self.load_media(),
            self.load_members(),
            self.load_collections(),
            self.load_relief_funds(),
        );

        let result = feeds
            .and(events)
            .and(media)
            .and(members)
            .and(collections)
            .and(relief_funds);

        drop(_loading);
        self.bump();

        match &result {
            Ok(()) => info!("community data refreshed"),
            Err(err) => warn!(error = %err, "community data refresh failed"),
        }
        result
    }

    async fn load_comments_for(&self, feed_id: Option<&str>) -> Vec<Comment> {
        let Some(feed_id) = feed_id else {
            return Vec::new();
        };
        match self.api.fetch_comments(feed_id).await {
            Ok(records) => records.iter().map(map_comment).collect(),
            Err(err) => {
                warn!(feed_id, error = %err, "failed to fetch comments for feed");
                Vec::new()
            }
        }
    }

    async fn load_feeds(&self) -> Result<()> {
        let feeds = self.api.fetch_feeds().await?;
        let comments = join_all(
            feeds
                .iter()
                .map(|feed| self.load_comments_for(feed.record_id())),
        )
        .await;

        let posts: Vec<Post> = feeds
            .iter()
            .zip(comments)
            .map(|(feed, comments)| map_feed_to_post(feed, comments))
            .collect();
        debug!(count = posts.len(), "loaded posts");
        self.state.write().await.posts = posts;
        Ok(())
    }

    async fn load_events(&self) -> Result<()> {
        let events: Vec<CommunityEvent> = self
            .api
            .fetch_events()
            .await?
            .iter()
            .map(map_event)
            .collect();
        debug!(count = events.len(), "loaded events");
        self.state.write().await.events = events;
        Ok(())
    }

    async fn load_media(&self) -> Result<()> {
        let media: Vec<MediaItem> = self
            .api
            .fetch_media()
            .await?
            .iter()
            .map(map_media)
            .collect();
        debug!(count = media.len(), "loaded media");
        self.state.write().await.media = media;
        Ok(())
    }

    async fn load_members(&self) -> Result<()> {
        let members: Vec<Member> = self
            .api
            .fetch_members()
            .await?
            .iter()
            .map(map_member)
            .collect();
        debug!(count = members.len(), "loaded members");
        self.state.write().await.members = members;
        Ok(())
    }

    async fn load_collections(&self) -> Result<()> {
        let donations: Vec<DonationRecord> = self
            .api
            .fetch_collections()
            .await?
            .iter()
            .map(map_collection)
            .collect();
        debug!(count = donations.len(), "loaded donation records");
        self.state.write().await.donations = donations;
        Ok(())
    }

    /// 救済基金はバックエンド未対応のため、失敗しても refresh は止めない
    async fn load_relief_funds(&self) -> Result<()> {
        let funds = match self.api.fetch_relief_funds().await {
            Ok(records) => records.iter().map(map_relief_fund).collect(),
            Err(AppError::NotImplemented(reason)) => {
                debug!(%reason, "relief fund load skipped");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "relief fund load skipped");
                Vec::new()
            }
        };
        self.state.write().await.relief_funds = funds;
        Ok(())
    }

    // ---- 投稿・コメント ----

    pub async fn add_post(&self, input: NewPost) -> Result<Post> {
        self.ensure_role(ViewerRole::can_publish, "create posts").await?;
        input.validate()?;
        let record = self
            .api
            .create_feed(CreateFeedRequest {
                title: input.title.trim().to_string(),
                description: input.content.trim().to_string(),
                category: DEFAULT_CATEGORY.to_string(),
                media: input.media,
            })
            .await?;

        let comments = self.load_comments_for(record.record_id()).await;
        let post = map_feed_to_post(&record, comments);

        self.state.write().await.posts.insert(0, post.clone());
        self.bump();
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_publish, "delete posts").await?;
        self.api.delete_feed(post_id).await?;
        self.state
            .write()
            .await
            .posts
            .retain(|post| post.id != post_id);
        self.bump();
        info!(post_id, "post deleted");
        Ok(())
    }

    /// 投稿の末尾にコメントを追加する。他の投稿には触れない
    pub async fn add_comment_to_post(&self, post_id: &str, input: NewComment) -> Result<Comment> {
        input.validate()?;
        let role = {
            let state = self.state.read().await;
            if !state.posts.iter().any(|post| post.id == post_id) {
                return Err(AppError::NotFound(format!("post {post_id}")));
            }
            state.role
        };

        let author = input
            .author
            .filter(|author| !author.trim().is_empty())
            .unwrap_or_else(|| role.author_label().to_string());
        let message = input.message.trim().to_string();

        let mut record = self
            .api
            .create_comment(CreateCommentRequest {
                feed_id: post_id.to_string(),
                user_id: Some(author.clone()),
                text: message.clone(),
            })
            .await?
            .unwrap_or_default();
        if !record.has_author() {
            record.author = Some(author);
        }
        if record.text.is_none() && record.message.is_none() {
            record.text = Some(message);
        }
        let comment = map_comment(&record);

        let mut state = self.state.write().await;
        match state.posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => post.add_comment(comment.clone()),
            None => warn!(post_id, "post disappeared before comment could be attached"),
        }
        drop(state);
        self.bump();
        info!(post_id, comment_id = %comment.id, "comment added");
        Ok(comment)
    }

    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_manage, "delete comments").await?;
        self.api.delete_comment(comment_id).await?;
        let mut state = self.state.write().await;
        let removed = state
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .is_some_and(|post| post.remove_comment(comment_id));
        drop(state);
        self.bump();
        debug!(post_id, comment_id, removed, "comment deleted");
        Ok(())
    }

    // ---- イベント ----

    fn event_form(input: EventInput) -> EventForm {
        EventForm {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            starts_at: input.starts_at,
            location: input.location.trim().to_string(),
            cover: input.cover_image,
        }
    }

    pub async fn add_event(&self, input: EventInput) -> Result<CommunityEvent> {
        self.ensure_role(ViewerRole::can_publish, "create events").await?;
        input.validate()?;
        let record = self.api.create_event(Self::event_form(input)).await?;
        let event = map_event(&record);

        self.state.write().await.events.insert(0, event.clone());
        self.bump();
        info!(event_id = %event.id, "event created");
        Ok(event)
    }

    pub async fn update_event(&self, event_id: &str, input: EventInput) -> Result<CommunityEvent> {
        self.ensure_role(ViewerRole::can_publish, "update events").await?;
        input.validate()?;
        let record = self
            .api
            .update_event(event_id, Self::event_form(input))
            .await?;
        let mut event = map_event(&record);
        if record.record_id().is_none() {
            event.id = event_id.to_string();
        }

        let mut state = self.state.write().await;
        replace_or_prepend(&mut state.events, event.clone(), |existing| {
            existing.id == event_id
        });
        drop(state);
        self.bump();
        info!(event_id, "event updated");
        Ok(event)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_publish, "delete events").await?;
        self.api.delete_event(event_id).await?;
        self.state
            .write()
            .await
            .events
            .retain(|event| event.id != event_id);
        self.bump();
        info!(event_id, "event deleted");
        Ok(())
    }

    // ---- メディア ----

    pub async fn add_media(&self, input: NewMedia) -> Result<MediaItem> {
        self.ensure_role(ViewerRole::can_publish, "upload media").await?;
        let title = input.title.trim().to_string();
        // 外部 URL はアップロードせずリンクとして扱う
        let (remote_link, upload) = match input.file {
            Some(file) if file.is_remote() => (Some(file.uri), None),
            file => (None, file),
        };
        let kind = input.kind;

        let mut record = self
            .api
            .create_media(CreateMediaRequest {
                title: title.clone(),
                category: DEFAULT_CATEGORY.to_string(),
                media: upload,
            })
            .await?;
        record.title = Some(title);
        record.description = input.description;
        if record.media.is_none() && record.url.is_none() {
            record.url = remote_link;
        }

        let mut item = map_media(&record);
        item.kind = kind;

        self.state.write().await.media.insert(0, item.clone());
        self.bump();
        info!(media_id = %item.id, kind = %item.kind, "media created");
        Ok(item)
    }

    pub async fn delete_media(&self, media_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_publish, "delete media").await?;
        self.api.delete_media(media_id).await?;
        self.state
            .write()
            .await
            .media
            .retain(|item| item.id != media_id);
        self.bump();
        info!(media_id, "media deleted");
        Ok(())
    }

    // ---- メンバー ----

    pub async fn add_or_update_member(&self, input: MemberInput) -> Result<Member> {
        self.ensure_role(ViewerRole::can_manage, "manage members").await?;
        input.validate()?;
        let name = input.name.trim().to_string();
        let email = input.email.trim().to_string();
        let role = input.role_for_server();
        let form = MemberForm {
            user_name: name.clone(),
            email: email.clone(),
            role: role.clone(),
            phone_number: input.phone_number.clone(),
            media: input.avatar.clone(),
        };

        let mut record = match input.id.as_deref() {
            Some(member_id) => self.api.update_member(member_id, form).await?,
            None => self.api.create_member(form).await?,
        };
        // レスポンスに欠けている項目は送信した値で補う
        if record.user_name.is_none() && record.name.is_none() {
            record.user_name = Some(name);
        }
        if record.email.is_none() {
            record.email = Some(email);
        }
        if record.phone_number.is_none() {
            record.phone_number = input.phone_number.clone();
        }
        if record.role.is_none() && record.status.is_none() {
            record.role = Some(role);
        }

        let mut member = map_member(&record);
        member.status = input.status;
        if let Some(member_id) = input.id.as_deref() {
            if is_local_id(&member.id) {
                member.id = member_id.to_string();
            }
        }

        let mut state = self.state.write().await;
        let previous_contribution = state
            .members
            .iter()
            .find(|existing| existing.id == member.id)
            .map(|existing| existing.monthly_contribution);
        member.monthly_contribution = input
            .monthly_contribution
            .or(previous_contribution)
            .unwrap_or(0.0);
        let member_id = member.id.clone();
        replace_or_prepend(&mut state.members, member.clone(), |existing| {
            existing.id == member_id
        });
        drop(state);
        self.bump();
        info!(member_id = %member.id, status = %member.status, "member saved");
        Ok(member)
    }

    /// メンバーを削除し、そのメンバーの寄付記録もすべて取り除く
    pub async fn remove_member(&self, member_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_manage, "remove members").await?;
        self.api.delete_member(member_id).await?;

        let mut state = self.state.write().await;
        state.members.retain(|member| member.id != member_id);
        let before = state.donations.len();
        state
            .donations
            .retain(|donation| !donation.belongs_to(member_id));
        let purged = before - state.donations.len();
        drop(state);
        self.bump();
        info!(member_id, purged, "member removed");
        Ok(())
    }

    // ---- 寄付記録 ----

    pub async fn log_donation(&self, input: DonationInput) -> Result<DonationRecord> {
        self.ensure_role(ViewerRole::can_manage, "log donations").await?;
        input.validate()?;
        let record = self
            .api
            .create_collection(CreateCollectionRequest {
                member_id: input.member_id.clone(),
                date: input.month.trim().to_string(),
                monthly_amount: input.payment_status(),
                bhawan_amount: input.amount,
            })
            .await?;
        let mut donation = map_collection(&record);

        let mut state = self.state.write().await;
        if donation.member_id == UNKNOWN_MEMBER_ID {
            // レスポンスにメンバーが含まれない場合は送信した ID を使う
            donation.member_id = input.member_id.clone();
            if let Some(member) = state.members.iter().find(|m| m.id == input.member_id) {
                donation.member_name = member.name.clone();
            }
        }
        state.donations.insert(0, donation.clone());
        drop(state);
        self.bump();
        info!(donation_id = %donation.id, member_id = %donation.member_id, "donation logged");
        Ok(donation)
    }

    /// 既存の寄付記録を同じ ID のまま置き換える。読み込まれていない記録は NotFound
    pub async fn update_donation(&self, input: DonationUpdate) -> Result<DonationRecord> {
        self.ensure_role(ViewerRole::can_manage, "update donations").await?;
        input.validate()?;
        if !self
            .state
            .read()
            .await
            .donations
            .iter()
            .any(|donation| donation.id == input.id)
        {
            return Err(AppError::NotFound(format!("donation {}", input.id)));
        }
        let record = self
            .api
            .update_collection(UpdateCollectionRequest {
                collection_id: input.id.clone(),
                date: input.month.trim().to_string(),
                monthly_amount: input.payment_status(),
                bhawan_amount: input.amount,
            })
            .await?;
        let mut donation = map_collection(&record);
        donation.id = input.id.clone();

        let mut state = self.state.write().await;
        match state.donations.iter_mut().find(|d| d.id == input.id) {
            Some(existing) => {
                if donation.member_id == UNKNOWN_MEMBER_ID {
                    donation.member_id = existing.member_id.clone();
                    donation.member_name = existing.member_name.clone();
                }
                *existing = donation.clone();
            }
            None => warn!(donation_id = %input.id, "donation disappeared before update was applied"),
        }
        drop(state);
        self.bump();
        info!(donation_id = %donation.id, "donation updated");
        Ok(donation)
    }

    pub async fn remove_donation(&self, donation_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_manage, "remove donations").await?;
        self.api.delete_collection(donation_id).await?;
        self.state
            .write()
            .await
            .donations
            .retain(|donation| donation.id != donation_id);
        self.bump();
        info!(donation_id, "donation removed");
        Ok(())
    }

    // ---- 救済基金 ----

    /// バックエンドにルートがないため未実装
    pub async fn add_or_update_relief_fund(&self, fund: ReliefFund) -> Result<ReliefFund> {
        self.ensure_role(ViewerRole::can_manage, "manage relief funds").await?;
        warn!(fund_id = %fund.id, "relief fund management is not supported by the backend yet");
        Err(AppError::NotImplemented(
            "relief fund management is not supported by the backend".to_string(),
        ))
    }

    pub async fn remove_relief_fund(&self, fund_id: &str) -> Result<()> {
        self.ensure_role(ViewerRole::can_manage, "remove relief funds").await?;
        warn!(fund_id, "relief fund removal is not supported by the backend yet");
        Err(AppError::NotImplemented(
            "relief fund removal is not supported by the backend".to_string(),
        ))
    }
}
