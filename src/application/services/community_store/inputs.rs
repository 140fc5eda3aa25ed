use crate::domain::value_objects::{FileDescriptor, MediaKind, MemberStatus};
use crate::shared::error::{AppError, Result};

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

fn require_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::invalid_input(format!(
            "amount must be a non-negative number: {amount}"
        )));
    }
    Ok(())
}

/// 金額から支払い状況ラベルを決める
pub(crate) fn default_payment_status(amount: f64) -> &'static str {
    if amount > 0.0 { "Paid" } else { "Pending" }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub media: Option<FileDescriptor>,
}

impl NewPost {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    /// 未指定なら閲覧ロールのラベルを使う
    pub author: Option<String>,
}

impl NewComment {
    pub fn validate(&self) -> Result<()> {
        require_text("message", &self.message)
    }
}

#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub location: String,
    pub cover_image: Option<FileDescriptor>,
}

impl EventInput {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub title: String,
    pub description: Option<String>,
    pub file: Option<FileDescriptor>,
    pub kind: MediaKind,
}

#[derive(Debug, Clone)]
pub struct MemberInput {
    /// `Some` なら更新、`None` なら新規作成
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role_label: Option<String>,
    pub status: MemberStatus,
    pub monthly_contribution: Option<f64>,
    pub avatar: Option<FileDescriptor>,
}

impl MemberInput {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        if let Some(contribution) = self.monthly_contribution {
            require_amount(contribution)?;
        }
        Ok(())
    }

    /// サーバーへ送る role。ラベルがなければステータスを送る
    pub fn role_for_server(&self) -> String {
        self.role_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(self.status.as_str())
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DonationInput {
    pub member_id: String,
    pub amount: f64,
    pub month: String,
    pub status: Option<String>,
}

impl DonationInput {
    pub fn validate(&self) -> Result<()> {
        require_text("member_id", &self.member_id)?;
        require_text("month", &self.month)?;
        require_amount(self.amount)
    }

    pub fn payment_status(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| default_payment_status(self.amount).to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DonationUpdate {
    pub id: String,
    pub amount: f64,
    pub month: String,
    pub status: Option<String>,
}

impl DonationUpdate {
    pub fn validate(&self) -> Result<()> {
        require_text("id", &self.id)?;
        require_text("month", &self.month)?;
        require_amount(self.amount)
    }

    pub fn payment_status(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| default_payment_status(self.amount).to_string())
    }
}
