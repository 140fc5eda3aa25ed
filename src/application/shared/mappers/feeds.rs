use super::{id_or_generate, parse_timestamp, text_or};
use crate::application::ports::records::{CommentRecord, FeedRecord};
use crate::domain::entities::{Comment, Post};
use chrono::Utc;

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_COMMENT_AUTHOR: &str = "Member";

pub fn map_feed_to_post(feed: &FeedRecord, comments: Vec<Comment>) -> Post {
    Post {
        id: id_or_generate(feed.record_id()),
        title: text_or(feed.title.as_ref(), UNTITLED),
        content: text_or(feed.description.as_ref(), ""),
        image: feed.media.clone().filter(|url| !url.is_empty()),
        comments,
        created_at: feed.created_at.as_deref().and_then(parse_timestamp),
    }
}

pub fn map_comment(comment: &CommentRecord) -> Comment {
    let author = comment
        .user_name()
        .map(str::to_string)
        .or_else(|| comment.author.clone())
        .unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string());
    let message = comment
        .text
        .clone()
        .or_else(|| comment.message.clone())
        .unwrap_or_default();

    Comment {
        id: id_or_generate(comment.record_id()),
        author,
        message,
        created_at: comment
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
    }
}
