use super::donations::DonationSummary;
use crate::domain::entities::{CommunityEvent, MediaItem, Member, Post, ReliefFund};
use std::fmt::Write;

// String への write! は失敗しない
pub fn render_posts(posts: &[Post]) -> String {
    let mut out = String::new();
    for post in posts {
        let posted = post
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "[{}] {} ({posted})", post.id, post.title);
        if !post.content.is_empty() {
            let _ = writeln!(out, "    {}", post.content);
        }
        if let Some(image) = &post.image {
            let _ = writeln!(out, "    image: {image}");
        }
        for comment in &post.comments {
            let _ = writeln!(out, "    - {}: {}", comment.author, comment.message);
        }
    }
    out
}

pub fn render_events(events: &[CommunityEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = writeln!(
            out,
            "[{}] {} @ {} on {}",
            event.id, event.title, event.location, event.starts_at
        );
        if !event.description.is_empty() {
            let _ = writeln!(out, "    {}", event.description);
        }
    }
    out
}

pub fn render_media(media: &[MediaItem]) -> String {
    let mut out = String::new();
    for item in media {
        let _ = writeln!(out, "[{}] {} ({}) {}", item.id, item.title, item.kind, item.url);
    }
    out
}

pub fn render_members(members: &[Member]) -> String {
    let mut out = String::new();
    for member in members {
        let _ = writeln!(
            out,
            "[{}] {} <{}> {} {}",
            member.id,
            member.name,
            member.email,
            member.status,
            member.phone_number.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn render_donations(rows: &[DonationSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "[{}] {} {} {}: paid {:.2}, unpaid {:.2}, extra {:.2}",
            row.donation_id, row.month, row.member_name, row.status, row.paid, row.unpaid, row.extra
        );
    }
    out
}

pub fn render_relief_funds(funds: &[ReliefFund]) -> String {
    let mut out = String::new();
    for fund in funds {
        let _ = writeln!(
            out,
            "[{}] {} {:.0}/{:.0} ({:.0}%)",
            fund.id,
            fund.title,
            fund.raised,
            fund.goal,
            fund.progress_percent()
        );
        for bank in &fund.bank_details {
            let _ = writeln!(
                out,
                "    {} / {} / {}",
                bank.bank_name, bank.account_name, bank.account_number
            );
        }
    }
    out
}
