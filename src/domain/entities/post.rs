use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// サーバー側の呼び名は feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub comments: Vec<Comment>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn remove_comment(&mut self, comment_id: &str) -> bool {
        let before = self.comments.len();
        self.comments.retain(|comment| comment.id != comment_id);
        self.comments.len() != before
    }
}
